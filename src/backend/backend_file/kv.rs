use std::collections::BTreeMap;
use std::io::{self, BufRead, BufReader, ErrorKind, Read, Write};

use log::error;

use super::FindError;

pub type KeyValues = BTreeMap<String, String>;

/// One `key: value` pair per line. Keys are percent-encoded so they can
/// carry colons (usernames end up in keys), values are stored raw.
pub fn read(input: impl Read) -> Result<KeyValues, FindError> {
    let mut kv = BTreeMap::new();

    for line in BufReader::new(input).lines() {
        let line = line.map_err(|e| {
            error!("couldn't read line: {e}");
            FindError::Internal
        })?;

        if line.is_empty() {
            continue;
        }

        let (k, v) = line.split_once(':').ok_or_else(|| {
            error!("invalid line, can't split");
            FindError::Internal
        })?;

        let Some(v) = v.strip_prefix(' ') else {
            error!("invalid line - no whitespace after colon");
            return Err(FindError::Internal);
        };

        let k = urlencoding::decode(k).map_err(|e| {
            error!("invalid key {k:?}: {e}");
            FindError::Internal
        })?;

        kv.insert(k.into_owned(), v.into());
    }

    Ok(kv)
}

pub fn write(mut output: impl Write, keyvalues: &KeyValues) -> Result<(), io::Error> {
    for (k, v) in keyvalues {
        if v.contains(['\n', '\r']) {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("value for {k:?} spans lines"),
            ));
        }
        writeln!(output, "{}: {}", urlencoding::encode(k), v)?;
    }
    Ok(())
}
