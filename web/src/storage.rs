use gloo::storage::{LocalStorage, Storage};
use memorito_core::ScoreStorage;

/// Leaderboard persistence backed by browser local storage.
///
/// Failures are logged and swallowed: losing leaderboard history is
/// non-critical and must never break gameplay.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct LocalScoreStorage;

impl ScoreStorage for LocalScoreStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::raw().set_item(key, value) {
            log::error!("Could not save scores to local storage: {:?}", err);
        }
    }

    fn remove(&mut self, key: &str) {
        LocalStorage::delete(key);
    }
}
