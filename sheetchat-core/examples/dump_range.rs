use sheetchat_core::{CellRange, read_range};
use std::env;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file.xlsx|file.ods> [RANGE]", args[0]);
        std::process::exit(1);
    }

    let path = &args[1];
    let range = match args.get(2) {
        Some(spec) => Some(spec.parse::<CellRange>()?),
        None => None,
    };

    let grid = read_range(path, range.as_ref())?;
    println!("File: {}", path);
    println!("Grid: {} rows x {} cols", grid.row_count(), grid.col_count());

    for (i, row) in grid.rows.iter().enumerate() {
        let line = row
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" | ");
        println!("{:>4}: {line}", i + 1);
    }

    Ok(())
}
