use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn admin_password(&self) -> String;
    fn frontend_path(&self) -> PathBuf;
    fn port(&self) -> String;
    fn storage_path(&self) -> PathBuf;
}
