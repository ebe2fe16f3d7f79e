use super::{Backend, ConnectionUrl, NoteStore, PostgisStore, TableName};
use crate::config::{PoolConfig, PropertySource};
use crate::error::{ConfigError, NoteError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// One validated `note.<i>.*` declaration.
#[derive(Debug, Clone)]
pub struct BackendSpec {
    pub index: usize,
    pub id: String,
    pub table: TableName,
    pub srid: i32,
    pub connection: ConnectionUrl,
}

impl BackendSpec {
    /// Scans `note.0.*`, `note.1.*`, ... and stops at the first index without
    /// an `id`, even if later indices are declared.
    pub fn scan(source: &impl PropertySource) -> Result<Vec<Self>, ConfigError> {
        let mut specs = Vec::new();
        for index in 0usize.. {
            let Some(id) = source.get_property(&property_key(index, "id")) else {
                break;
            };
            specs.push(Self::read(source, index, id)?);
        }
        Ok(specs)
    }

    fn read(source: &impl PropertySource, index: usize, id: String) -> Result<Self, ConfigError> {
        let table_key = property_key(index, "table");
        let raw_table = required(source, &table_key)?;
        let table = TableName::parse(&raw_table).map_err(|reason| ConfigError::InvalidTable {
            key: table_key,
            value: raw_table,
            reason,
        })?;

        let srid_key = property_key(index, "srid");
        let raw_srid = required(source, &srid_key)?;
        let srid = parse_srid(&raw_srid).ok_or(ConfigError::InvalidSrid {
            key: srid_key,
            value: raw_srid,
        })?;

        let url_key = property_key(index, "jdbcUrl");
        let raw_url = required(source, &url_key)?;
        let connection = ConnectionUrl::parse(&raw_url)
            .map_err(|reason| ConfigError::InvalidConnectionUrl { key: url_key, reason })?;

        Ok(Self {
            index,
            id,
            table,
            srid,
            connection,
        })
    }
}

fn property_key(index: usize, field: &str) -> String {
    format!("note.{index}.{field}")
}

fn required(source: &impl PropertySource, key: &str) -> Result<String, ConfigError> {
    source
        .get_property(key)
        .ok_or_else(|| ConfigError::MissingKey {
            key: key.to_string(),
        })
}

fn parse_srid(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|srid| *srid > 0)
}

/// Immutable mapping from backend id to [`Backend`], built once at startup
/// and shared read-only by every request handler.
#[derive(Debug, Default)]
pub struct BackendRegistry {
    backends: HashMap<String, Backend>,
}

impl BackendRegistry {
    /// Builds PostGIS backends from the `note.<i>.*` declarations.
    pub fn build(source: &impl PropertySource, pool: &PoolConfig) -> Result<Self, ConfigError> {
        Self::build_with(source, |spec| {
            Ok(Arc::new(PostgisStore::connect_lazy(spec, pool)) as Arc<dyn NoteStore>)
        })
    }

    /// Same scan as [`BackendRegistry::build`], with the store of each
    /// backend produced by `make_store`.
    ///
    /// A later declaration reusing an earlier id replaces it.
    pub fn build_with<F>(source: &impl PropertySource, mut make_store: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&BackendSpec) -> Result<Arc<dyn NoteStore>, ConfigError>,
    {
        let specs = BackendSpec::scan(source)?;
        let mut backends = HashMap::with_capacity(specs.len());

        for spec in specs {
            let store = make_store(&spec)?;
            info!(
                index = spec.index,
                id = %spec.id,
                table = %spec.table,
                srid = spec.srid,
                url = %spec.connection.redacted(),
                "Registered note backend"
            );

            let backend = Backend::new(spec.id.clone(), spec.table, spec.srid, store);
            if let Some(previous) = backends.insert(spec.id, backend) {
                warn!(
                    index = spec.index,
                    id = %previous.id(),
                    replaced_table = %previous.table(),
                    "Duplicate note backend id; the later declaration wins"
                );
            }
        }

        Ok(Self { backends })
    }

    pub fn from_backends(backends: impl IntoIterator<Item = Backend>) -> Self {
        Self {
            backends: backends
                .into_iter()
                .map(|b| (b.id().to_string(), b))
                .collect(),
        }
    }

    pub fn lookup(&self, id: &str) -> Result<&Backend, NoteError> {
        self.backends
            .get(id)
            .ok_or_else(|| NoteError::BackendNotFound(id.to_string()))
    }

    /// All backends, in no particular order.
    pub fn list(&self) -> impl Iterator<Item = &Backend> {
        self.backends.values()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Closes every backend store. In-flight stores on a closed pool fail.
    pub async fn close(&self) {
        for backend in self.backends.values() {
            backend.close().await;
        }
        info!(count = self.backends.len(), "Note backends closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srid_must_be_a_positive_integer() {
        assert_eq!(parse_srid("4326"), Some(4326));
        assert_eq!(parse_srid(" 2154 "), Some(2154));
        assert_eq!(parse_srid("0"), None);
        assert_eq!(parse_srid("-4326"), None);
        assert_eq!(parse_srid("EPSG:4326"), None);
        assert_eq!(parse_srid(""), None);
    }

    #[test]
    fn property_keys_use_zero_based_index() {
        assert_eq!(property_key(0, "jdbcUrl"), "note.0.jdbcUrl");
        assert_eq!(property_key(12, "srid"), "note.12.srid");
    }
}
