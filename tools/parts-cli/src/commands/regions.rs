//! Region catalog listing.

use anyhow::{bail, Result};
use parts_market::location;

use super::RegionsArgs;
use crate::context::Context;

/// Run the regions command.
pub async fn run(args: RegionsArgs, ctx: &Context) -> Result<()> {
    match args.province {
        None => {
            let provinces: Vec<&str> = location::provinces().collect();
            if ctx.output.is_json() {
                ctx.output.json(&provinces);
                return Ok(());
            }
            ctx.output.header("Provinces");
            for province in provinces {
                ctx.output.list_item(province);
            }
        }
        Some(province) => {
            if !location::is_known_province(&province) {
                bail!("Unknown province: {province}. Run `parts regions` to list them.");
            }
            let cities = location::cities_of(&province);
            if ctx.output.is_json() {
                ctx.output.json(&cities);
                return Ok(());
            }
            ctx.output.header(&format!("Cities in {province}"));
            for city in cities {
                ctx.output.list_item(city);
            }
        }
    }

    Ok(())
}
