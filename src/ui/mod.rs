// Copyright (c) 2026 homeguard
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/homeguard-sim/homeguard

//! Console front-end
//!
//! Stand-in for the excluded GUI: a single event loop on the main thread
//! multiplexes stdin commands with the UI event queue, so no security event
//! is ever rendered from a sensor thread.

use std::io::BufRead;
use std::thread;

use anyhow::Result;
use crossbeam::channel::unbounded;
use crossbeam::select;

use crate::core::{SecuritySystem, UiEvent, UpdateKind, DEFAULT_EVENT_LIMIT};

/// Commands accepted at the console prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Arm the system
    Arm,
    /// Disarm the system
    Disarm,
    /// Manually trip the sensor at the given index
    Trigger(usize),
    /// Show recent log entries
    Events,
    /// Show system state and the sensor list
    Status,
    /// Print the command summary
    Help,
    /// Leave the console loop
    Quit,
}

impl Command {
    /// Parse a trimmed input line; `None` for anything unrecognized
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        match parts.next()? {
            "arm" => Some(Command::Arm),
            "disarm" => Some(Command::Disarm),
            "trigger" => parts.next()?.parse().ok().map(Command::Trigger),
            "events" => Some(Command::Events),
            "status" => Some(Command::Status),
            "help" => Some(Command::Help),
            "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Run the console loop until `quit` or stdin closes
pub fn run_console(system: &SecuritySystem) -> Result<()> {
    let ui_rx = system.subscribe();
    let (line_tx, line_rx) = unbounded::<String>();

    // Blocking stdin reads get their own thread; lines are forwarded onto a
    // channel the main loop can select over.
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    print_help(system);

    loop {
        select! {
            recv(ui_rx) -> event => {
                let Ok(event) = event else { break };
                render_event(&event);
            }
            recv(line_rx) -> line => {
                let Ok(line) = line else { break };
                match Command::parse(line.trim()) {
                    Some(Command::Quit) => break,
                    Some(command) => run_command(system, command)?,
                    None if line.trim().is_empty() => {}
                    None => println!("unknown command: {} (try 'help')", line.trim()),
                }
            }
        }
    }

    Ok(())
}

fn run_command(system: &SecuritySystem, command: Command) -> Result<()> {
    match command {
        Command::Arm => {
            let timestamp = system.arm_system()?;
            println!("armed at {timestamp}");
        }
        Command::Disarm => {
            let timestamp = system.disarm_system()?;
            println!("disarmed at {timestamp}");
        }
        Command::Trigger(index) => {
            if !system.simulate_motion(index) {
                println!("no motion sensor at index {index}");
            }
        }
        Command::Events => {
            for event in system.recent_events(DEFAULT_EVENT_LIMIT)? {
                println!("{} - {}: {}", event.timestamp, event.category, event.description);
            }
        }
        Command::Status => {
            println!("{}: {}", system.name(), system.state());
            for (i, sensor) in system.sensors().iter().enumerate() {
                println!("  [{i}] {} at {}", sensor.name(), sensor.location());
            }
        }
        Command::Help => print_help(system),
        Command::Quit => {}
    }
    Ok(())
}

fn render_event(event: &UiEvent) {
    match event {
        UiEvent::SensorUpdate {
            kind: UpdateKind::Alert,
            location,
            timestamp,
        } => println!("!!! INTRUDER DETECTED at {location} - {timestamp}"),
        UiEvent::SensorUpdate {
            kind: UpdateKind::Motion,
            location,
            timestamp,
        } => println!("motion at {location} ({timestamp})"),
        UiEvent::Alert { message, timestamp } => {
            println!("SECURITY ALERT: {message} - {timestamp}");
        }
        UiEvent::StateChanged(state) => println!("system state: {state}"),
    }
}

fn print_help(system: &SecuritySystem) {
    println!("{} - commands:", system.name());
    println!("  arm | disarm       arm or disarm the system");
    println!("  trigger <index>    manually trip a sensor (0..{})", system.sensor_count());
    println!("  events             show recent log entries");
    println!("  status             show system state and sensors");
    println!("  quit               stop monitoring and exit");
}
