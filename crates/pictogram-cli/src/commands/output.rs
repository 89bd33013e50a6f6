use anyhow::Result;
use pictogram_core::{ErrorResponse, PictogramError};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// In JSON mode errors are also written to stdout as `{ error, kind }`.
pub fn report_error(err: PictogramError, json: bool) -> anyhow::Error {
    if json {
        if let Ok(body) = serde_json::to_string_pretty(&ErrorResponse::from(&err)) {
            println!("{body}");
        }
    }
    err.into()
}
