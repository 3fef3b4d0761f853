pub mod config;

pub mod network {
    pub mod mac;
    pub mod record;
}
