mod address;
mod config;
mod set;

pub use address::{AddressToken, Destination, FinalAddress};
pub use config::{Charset, Config};
pub use set::{AddressSet, SetKey};

#[cfg(feature = "json")]
pub mod json {
    use serde::Serialize;

    use crate::error::{Error, ErrorKind, Result};

    pub fn to_json<T: ?Sized + Serialize>(value: &T) -> Result<String> {
        serde_json::to_string(value).map_err(|e| {
            Error::new(
                ErrorKind::SerializeJSON,
                format!("Failed to serialize data to json: {}", e),
            )
        })
    }
}
