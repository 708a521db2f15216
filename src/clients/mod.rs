pub mod skysmart_client;
pub mod step_source;

pub use skysmart_client::SkysmartClient;
pub use step_source::StepSource;
