//! The `fracdrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("fracdrill.toml").exists() {
        println!("fracdrill.toml already exists, skipping.");
    } else {
        std::fs::write("fracdrill.toml", SAMPLE_CONFIG)?;
        println!("Created fracdrill.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit fracdrill.toml to pick operations and a denominator range");
    println!("  2. Run: fracdrill generate --count 5");
    println!("  3. Run: fracdrill play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# fracdrill configuration

# Any of: addition, subtraction, multiplication, division
operations = ["addition", "subtraction"]

# One of: "1-5", "1-10", "1-12", "1-15"
denominator_range = "1-10"

# One of: "missing-result", "missing-operand", "both"
question_type = "both"

# Running tally, resumed if played again within an hour
progress_file = ".fracdrill/progress.json"
"#;
