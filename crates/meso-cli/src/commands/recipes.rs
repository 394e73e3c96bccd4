use anyhow::Result;
use meso_core::recipes::registry;

pub fn run() -> Result<()> {
    for entry in registry() {
        let channels: Vec<String> = entry.channels.iter().map(|c| c.to_string()).collect();
        println!("{:<26}{}", entry.name, channels.join(" "));
    }
    Ok(())
}
