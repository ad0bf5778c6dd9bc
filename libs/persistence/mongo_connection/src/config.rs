#[derive(Debug, Clone, serde::Deserialize)]
pub struct MongoDbConfig {
    #[serde(default = "uri_default")]
    pub uri: String,
    #[serde(default = "database_default")]
    pub database: String,
}

impl Default for MongoDbConfig {
    fn default() -> Self {
        Self {
            uri: uri_default(),
            database: database_default(),
        }
    }
}

fn uri_default() -> String { "mongodb://127.0.0.1:27017".into() }
fn database_default() -> String { "blog".into() }
