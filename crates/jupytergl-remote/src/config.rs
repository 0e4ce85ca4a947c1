/// Remote context settings.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Target named in constants/methods discovery requests.
    ///
    /// The front-end only answers for `"context"`.
    pub target: String,

    /// Logs every exec/query op at debug level.
    pub trace: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            target: "context".to_owned(),
            trace: false,
        }
    }
}
