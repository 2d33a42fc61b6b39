use std::fs;
use std::path::Path;

use crate::error::SolverError;

/// A client point to be attached to exactly one access point. The display
/// index used in the report is the client's 1-based position in input order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Client {
    pub x: f64,
    pub y: f64,
}

impl Client {
    pub fn point(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Loads clients from a `;`-delimited text file. The first line is a header
/// and is skipped; every following non-empty line must be `id;x;y` (the id
/// column is ignored).
pub fn load_clients(path: &Path) -> Result<Vec<Client>, SolverError> {
    let content = fs::read_to_string(path)?;
    parse_clients(&content)
}

fn parse_clients(content: &str) -> Result<Vec<Client>, SolverError> {
    let mut clients = Vec::new();

    for (lineno, line) in content.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(';').collect();
        if fields.len() != 3 {
            return Err(SolverError::InvalidInput(format!(
                "line {}: expected `id;x;y`, got {} fields",
                lineno + 1,
                fields.len()
            )));
        }

        let x: f64 = fields[1].trim().parse().map_err(|_| {
            SolverError::InvalidInput(format!("line {}: bad x coordinate {:?}", lineno + 1, fields[1]))
        })?;
        let y: f64 = fields[2].trim().parse().map_err(|_| {
            SolverError::InvalidInput(format!("line {}: bad y coordinate {:?}", lineno + 1, fields[2]))
        })?;

        clients.push(Client { x, y });
    }

    Ok(clients)
}

/// Built-in client set, used when no input file is given.
pub fn demo_clients() -> Vec<Client> {
    [
        (10.0, 10.0),
        (20.0, 30.0),
        (50.0, 50.0),
        (70.0, 10.0),
        (80.0, 60.0),
        (30.0, 80.0),
        (10.0, 70.0),
        (60.0, 40.0),
        (40.0, 20.0),
        (75.0, 75.0),
        (0.0, 0.0),
    ]
    .iter()
    .map(|&(x, y)| Client { x, y })
    .collect()
}
