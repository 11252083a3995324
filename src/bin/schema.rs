//! Print the wire JSON of the sample command without connecting anywhere

use anyhow::Result;

use guildcmd::dispatch::build_schema_list;
use guildcmd::poke::poke_command;

fn main() -> Result<()> {
    env_logger::init();

    let commands = vec![poke_command().build()];
    let body = build_schema_list(&commands)?;

    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
