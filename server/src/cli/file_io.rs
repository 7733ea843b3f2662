use crate::cli_error::CliError;
use crate::data_store::models;
use crate::data_store::{get_store_from_env, EventFilter, EventmiStore};
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

/// Import all events from the given JSON file into the database.
///
/// The file must contain a JSON array of [eventmi_api_types::Event] objects. Ids contained in the
/// file are ignored; the imported events get new ids assigned.
pub fn load_events_from_file(path: &PathBuf) -> Result<(), CliError> {
    let data_store = get_store_from_env()?;

    let f = File::open(path).map_err(|e| {
        CliError::FileError(format!("Could not open {:?} for reading: {}", path, e))
    })?;
    let ids = import_events(&data_store, BufReader::new(f))?;
    info!("Imported {} events from {:?}", ids.len(), path);

    Ok(())
}

/// Export all events from the database into a JSON file at the given path.
pub fn export_events_to_file(path: &PathBuf) -> Result<(), CliError> {
    let data_store = get_store_from_env()?;

    let f = File::create(path).map_err(|e| {
        CliError::FileError(format!("Could not open {:?} for writing: {}", path, e))
    })?;
    let mut writer = BufWriter::new(f);
    let count = export_events(&data_store, &mut writer)?;
    writer
        .flush()
        .map_err(|e| CliError::FileError(format!("Could not write {:?}: {}", path, e)))?;
    info!("Exported {} events to {:?}", count, path);

    Ok(())
}

fn import_events(
    data_store: &impl EventmiStore,
    reader: impl Read,
) -> Result<Vec<crate::data_store::EventId>, CliError> {
    let data: Vec<eventmi_api_types::Event> = serde_json::from_reader(reader)?;
    let events = data
        .into_iter()
        .map(|mut event| {
            event.name = event.name.trim().to_owned();
            event.place = event.place.trim().to_owned();
            if event.name.is_empty() || event.place.is_empty() {
                return Err(CliError::DataError(
                    "Event name and place must not be empty".to_owned(),
                ));
            }
            if event.end < event.start {
                return Err(CliError::DataError(format!(
                    "Event '{}' ends before it starts",
                    event.name
                )));
            }
            Ok(models::NewEvent::from(event))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut facade = data_store.get_facade()?;
    Ok(facade.import_events(events)?)
}

fn export_events(data_store: &impl EventmiStore, writer: impl Write) -> Result<usize, CliError> {
    let mut facade = data_store.get_facade()?;
    let events: Vec<eventmi_api_types::Event> = facade
        .get_events(EventFilter::default())?
        .into_iter()
        .map(|e| e.into())
        .collect();
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(events.len())
}
