use crate::cli_error::CliError;
use crate::data_store::models::Event;
use crate::data_store::{get_store_from_env, EventFilter, EventmiStore};

pub fn print_event_list() -> Result<(), CliError> {
    let data_store_pool = get_store_from_env()?;
    let mut data_store = data_store_pool.get_facade()?;

    let events = data_store.get_events(EventFilter::default())?;

    println!("{}", event_table(events));
    Ok(())
}

fn event_table(events: Vec<Event>) -> comfy_table::Table {
    let mut table = comfy_table::Table::new();
    table
        .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED)
        .set_header(vec!["id", "name", "start", "end", "place"])
        .add_rows(events.into_iter().map(|event| {
            [
                event.id.to_string(),
                event.name,
                event.start.format("%Y-%m-%d %H:%M").to_string(),
                event.end.format("%Y-%m-%d %H:%M").to_string(),
                event.place,
            ]
        }));
    table
}
