pub mod app;
pub mod assistant;
pub mod catalog;
pub mod errors;
pub mod filter;
pub mod pagination;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod ui;

#[cfg(test)]
mod tests {
    use crate::app::{App, CurrentScreen};
    use crate::store::LoadedState;

    #[test]
    fn test_app_new() {
        let app = App::new(LoadedState::default(), None);
        assert_eq!(app.current_screen, CurrentScreen::Browse);
    }

    #[test]
    fn test_featured_is_first_record() {
        let app = App::new(LoadedState::default(), None);
        let first_id = app.catalog[0].id;
        assert_eq!(app.featured().map(|i| i.id), Some(first_id));
    }
}
