//! Data source fixtures.

use stowage_storage::DataSource;

pub const PEER_A: &str = "10.0.0.4";
pub const PEER_B: &str = "10.0.0.5";
pub const S3_ENDPOINT: &str = "https://s3.eu-west-1.amazonaws.com";

pub fn local_source(name: &str, folder: &str, peer: &str) -> DataSource {
    let mut source = DataSource::local(name, folder, peer);
    source.objects_port = 9001;
    source
}

pub fn gateway_source(name: &str, api_key: &str, endpoint: &str) -> DataSource {
    let mut source = DataSource::gateway(name, endpoint, api_key, format!("{}-secret", api_key));
    source.objects_port = 9002;
    source
}
