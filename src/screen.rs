use crate::model::{DisplayMode, Draft, Reminder, ReminderId, ReminderStore};
use crate::sound::{SoundBank, SoundPlayer, SoundResource};
use crate::theme::Theme;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info};

pub const ALERT_TITLE: &str = "Error";
pub const ALERT_MESSAGE: &str = "Please fill in all fields.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Reminders,
    SillyMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Home,
    Silly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenFlags {
    pub night_mode: bool,
    pub sidebar_visible: bool,
    pub shuffle_active: bool,
    pub show_calendar: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum ScreenError {
    #[error("invalid date selection {input:?}: {source}")]
    InvalidDate {
        input: String,
        source: chrono::ParseError,
    },
}

pub trait Navigator {
    fn push(&mut self, route: Route);
}

/// Blocking user-facing notice. Only validation failures use it.
pub trait AlertSurface {
    fn alert(&mut self, title: &str, message: &str);
}

impl Route {
    pub fn screen(self) -> ScreenKind {
        match self {
            Route::Reminders => ScreenKind::Home,
            Route::SillyMode => ScreenKind::Silly,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Reminders => "/",
            Route::SillyMode => "/sillymode_page",
        }
    }
}

impl ScreenKind {
    pub fn route(self) -> Route {
        match self {
            ScreenKind::Home => Route::Reminders,
            ScreenKind::Silly => Route::SillyMode,
        }
    }

    pub fn counterpart(self) -> ScreenKind {
        match self {
            ScreenKind::Home => ScreenKind::Silly,
            ScreenKind::Silly => ScreenKind::Home,
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            ScreenKind::Home => "Reminders",
            ScreenKind::Silly => "SILLY REMINDERS!!!!!",
        }
    }

    pub fn title_placeholder(self) -> &'static str {
        match self {
            ScreenKind::Home => "Title",
            ScreenKind::Silly => "ltiTe",
        }
    }

    pub fn description_placeholder(self) -> &'static str {
        match self {
            ScreenKind::Home => "Description",
            ScreenKind::Silly => "iispnterDoc",
        }
    }

    pub fn due_placeholder(self) -> &'static str {
        match self {
            ScreenKind::Home => "Select Due Date",
            ScreenKind::Silly => "etDa Steuec leD",
        }
    }

    pub fn importance_label(self, important: bool) -> &'static str {
        match (self, important) {
            (ScreenKind::Home, true) => "★ Important",
            (ScreenKind::Home, false) => "☆ Mark as Important",
            (ScreenKind::Silly, true) => "😈 Unimportant...",
            (ScreenKind::Silly, false) => "☆ r pM aasokrmnItat",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            ScreenKind::Home => "Add Reminder",
            ScreenKind::Silly => "ADD A SILLY REMINDER?!",
        }
    }

    /// Text on the round navigation button.
    pub fn badge(self) -> &'static str {
        match self {
            ScreenKind::Home => "OFF",
            ScreenKind::Silly => "ON",
        }
    }
}

/// Per-screen state: the reminder store, the draft form and the view flags.
/// Lives exactly as long as its screen is shown.
pub struct ScreenController {
    kind: ScreenKind,
    store: ReminderStore,
    draft: Draft,
    flags: ScreenFlags,
    sounds: SoundBank,
}

impl ScreenController {
    pub fn new(
        kind: ScreenKind,
        night_mode: bool,
        player: Arc<dyn SoundPlayer>,
        sound: SoundResource,
    ) -> Self {
        info!(screen = ?kind, "entering screen");
        ScreenController {
            kind,
            store: ReminderStore::new(),
            draft: Draft::default(),
            flags: ScreenFlags {
                night_mode: night_mode && kind == ScreenKind::Home,
                ..ScreenFlags::default()
            },
            sounds: SoundBank::new(player, sound),
        }
    }

    pub fn kind(&self) -> ScreenKind {
        self.kind
    }

    pub fn store(&self) -> &ReminderStore {
        &self.store
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn flags(&self) -> ScreenFlags {
        self.flags
    }

    pub fn theme(&self) -> Theme {
        match self.kind {
            ScreenKind::Silly => Theme::silly(),
            ScreenKind::Home if self.flags.night_mode => Theme::night(),
            ScreenKind::Home => Theme::light(),
        }
    }

    pub fn display_mode(&self) -> DisplayMode {
        if self.kind == ScreenKind::Silly && self.flags.shuffle_active {
            DisplayMode::Shuffled
        } else {
            DisplayMode::Stable
        }
    }

    /// Reminders in the order this render should show them. Recomputed on
    /// every call, so shuffle mode yields a new order each time.
    pub fn visible_reminders(&self) -> Vec<&Reminder> {
        self.store
            .display_order(self.display_mode(), &mut rand::thread_rng())
    }

    pub fn submit(&mut self, alerts: &mut dyn AlertSurface) -> Option<ReminderId> {
        match self.store.add(&self.draft) {
            Ok(id) => {
                info!(id, screen = ?self.kind, "added reminder");
                self.draft = Draft::default();
                Some(id)
            }
            Err(err) => {
                debug!(error = %err, "rejected draft");
                alerts.alert(ALERT_TITLE, ALERT_MESSAGE);
                None
            }
        }
    }

    /// Accepts a `YYYY-MM-DD` day from the date picker and anchors it to
    /// midnight UTC so the shown day never drifts.
    pub fn select_date(&mut self, date_text: &str) -> Result<(), ScreenError> {
        let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d").map_err(|source| {
            ScreenError::InvalidDate {
                input: date_text.to_string(),
                source,
            }
        })?;
        self.draft.due = Some(midnight_utc(date));
        self.flags.show_calendar = false;
        Ok(())
    }

    pub fn delete_reminder(&mut self, id: ReminderId) -> Option<Reminder> {
        let removed = self.store.remove(id);
        if removed.is_some() {
            info!(id, screen = ?self.kind, "deleted reminder");
        }
        removed
    }

    pub fn navigate_to_other_screen(&mut self, navigator: &mut dyn Navigator) {
        if self.kind == ScreenKind::Silly {
            self.sounds.play_detached();
        }
        navigator.push(self.kind.counterpart().route());
    }

    pub fn toggle_important(&mut self) {
        self.draft.important = !self.draft.important;
    }

    pub fn toggle_night_mode(&mut self) {
        if self.kind == ScreenKind::Home {
            self.flags.night_mode = !self.flags.night_mode;
        }
    }

    pub fn toggle_sidebar(&mut self) {
        if self.kind == ScreenKind::Home {
            self.flags.sidebar_visible = !self.flags.sidebar_visible;
        }
    }

    pub fn toggle_shuffle(&mut self) {
        if self.kind == ScreenKind::Silly {
            self.flags.shuffle_active = !self.flags.shuffle_active;
        }
    }

    pub fn open_calendar(&mut self) {
        self.flags.show_calendar = true;
    }

    pub fn close_calendar(&mut self) {
        self.flags.show_calendar = false;
    }
}

impl Drop for ScreenController {
    fn drop(&mut self) {
        if self.store.is_empty() {
            info!(screen = ?self.kind, "leaving screen");
        } else {
            info!(screen = ?self.kind, discarded = self.store.len(), "leaving screen");
        }
    }
}

pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::tests::RecordingPlayer;
    use chrono::TimeZone;

    #[derive(Default)]
    struct Alerts(Vec<(String, String)>);

    impl AlertSurface for Alerts {
        fn alert(&mut self, title: &str, message: &str) {
            self.0.push((title.to_string(), message.to_string()));
        }
    }

    #[derive(Default)]
    struct Pushes(Vec<Route>);

    impl Navigator for Pushes {
        fn push(&mut self, route: Route) {
            self.0.push(route);
        }
    }

    fn controller(kind: ScreenKind) -> (ScreenController, Arc<RecordingPlayer>) {
        let player = Arc::new(RecordingPlayer::default());
        let screen = ScreenController::new(kind, false, player.clone(), SoundResource::Bell);
        (screen, player)
    }

    fn fill(screen: &mut ScreenController, title: &str, description: &str, day: &str) {
        let draft = screen.draft_mut();
        draft.title = title.into();
        draft.description = description.into();
        screen.select_date(day).unwrap();
    }

    #[test]
    fn submit_appends_and_clears_draft() {
        let (mut screen, _) = controller(ScreenKind::Home);
        let mut alerts = Alerts::default();
        fill(&mut screen, "Buy milk", "2%", "2024-01-05");
        screen.toggle_important();
        let id = screen.submit(&mut alerts).unwrap();
        assert_eq!(id, 1);
        assert!(alerts.0.is_empty());
        assert!(screen.draft().is_blank());
        let stored = &screen.store().reminders()[0];
        assert!(stored.important);
        assert_eq!(stored.due, Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn invalid_submit_alerts_once_and_keeps_draft() {
        let (mut screen, _) = controller(ScreenKind::Silly);
        let mut alerts = Alerts::default();
        screen.draft_mut().description = "only a description".into();
        let before = screen.draft().clone();
        assert!(screen.submit(&mut alerts).is_none());
        assert_eq!(
            alerts.0,
            vec![(ALERT_TITLE.to_string(), ALERT_MESSAGE.to_string())]
        );
        assert_eq!(screen.draft(), &before);
        assert!(screen.store().is_empty());
    }

    #[test]
    fn end_to_end_scenario() {
        let (mut screen, _) = controller(ScreenKind::Home);
        let mut alerts = Alerts::default();
        fill(&mut screen, "Buy milk", "2%", "2024-01-05");
        assert_eq!(screen.submit(&mut alerts), Some(1));
        fill(&mut screen, "Call mom", "birthday", "2024-01-06");
        screen.toggle_important();
        assert_eq!(screen.submit(&mut alerts), Some(2));
        assert!(screen.delete_reminder(1).is_some());
        fill(&mut screen, "", "anything", "2024-01-07");
        assert_eq!(screen.submit(&mut alerts), None);
        assert_eq!(alerts.0.len(), 1);
        let left: Vec<_> = screen
            .store()
            .reminders()
            .iter()
            .map(|r| (r.id, r.title.as_str(), r.important))
            .collect();
        assert_eq!(left, vec![(2, "Call mom", true)]);
    }

    #[test]
    fn select_date_closes_calendar_and_rejects_garbage() {
        let (mut screen, _) = controller(ScreenKind::Home);
        screen.open_calendar();
        assert!(screen.flags().show_calendar);
        screen.select_date("2024-02-29").unwrap();
        assert!(!screen.flags().show_calendar);
        assert_eq!(
            screen.draft().due.unwrap().to_rfc3339(),
            "2024-02-29T00:00:00+00:00"
        );
        screen.open_calendar();
        let err = screen.select_date("29/02/2024").unwrap_err();
        assert!(matches!(err, ScreenError::InvalidDate { .. }));
        assert!(screen.flags().show_calendar);
    }

    #[test]
    fn flags_are_scoped_to_their_screen() {
        let (mut home, _) = controller(ScreenKind::Home);
        home.toggle_shuffle();
        home.toggle_night_mode();
        home.toggle_sidebar();
        assert!(!home.flags().shuffle_active);
        assert!(home.flags().night_mode);
        assert!(home.flags().sidebar_visible);
        assert_eq!(home.theme(), Theme::night());
        assert_eq!(home.display_mode(), DisplayMode::Stable);

        let (mut silly, _) = controller(ScreenKind::Silly);
        silly.toggle_night_mode();
        silly.toggle_sidebar();
        silly.toggle_shuffle();
        assert!(!silly.flags().night_mode);
        assert!(!silly.flags().sidebar_visible);
        assert_eq!(silly.display_mode(), DisplayMode::Shuffled);
        assert_eq!(silly.theme(), Theme::silly());
    }

    #[test]
    fn navigating_from_home_is_silent() {
        let (mut screen, player) = controller(ScreenKind::Home);
        let mut nav = Pushes::default();
        screen.navigate_to_other_screen(&mut nav);
        assert_eq!(nav.0, vec![Route::SillyMode]);
        drop(screen);
        assert!(player.played.lock().unwrap().is_empty());
    }

    #[test]
    fn navigating_from_silly_plays_and_releases_on_drop() {
        let (mut screen, player) = controller(ScreenKind::Silly);
        let mut nav = Pushes::default();
        screen.navigate_to_other_screen(&mut nav);
        assert_eq!(nav.0, vec![Route::Reminders]);
        drop(screen);
        // The playback thread either handed the handle back before the drop or
        // unloaded it itself; both paths end with one play and one release.
        for _ in 0..200 {
            if !player.unloaded.lock().unwrap().is_empty() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(player.played.lock().unwrap().len(), 1);
        assert_eq!(*player.unloaded.lock().unwrap(), vec![1]);
    }

    #[test]
    fn failed_sound_does_not_block_navigation() {
        let player = Arc::new(RecordingPlayer::failing());
        let mut screen =
            ScreenController::new(ScreenKind::Silly, false, player.clone(), SoundResource::Bell);
        let mut nav = Pushes::default();
        screen.navigate_to_other_screen(&mut nav);
        assert_eq!(nav.0, vec![Route::Reminders]);
    }

    #[test]
    fn shuffle_never_touches_storage() {
        let (mut screen, _) = controller(ScreenKind::Silly);
        let mut alerts = Alerts::default();
        for (i, title) in ["a", "b", "c", "d"].iter().enumerate() {
            fill(&mut screen, title, "x", &format!("2024-03-0{}", i + 1));
            screen.submit(&mut alerts);
        }
        screen.toggle_shuffle();
        for _ in 0..10 {
            let mut ids: Vec<_> = screen.visible_reminders().iter().map(|r| r.id).collect();
            ids.sort_unstable();
            assert_eq!(ids, vec![1, 2, 3, 4]);
        }
        screen.toggle_shuffle();
        let ids: Vec<_> = screen.visible_reminders().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
