//! An editing session: one history, one writer, any number of observers.

use std::collections::BTreeMap;

use log::{debug, info};

use super::config::EditorConfig;
use super::format::convert;
use super::history::History;
use super::model::state::PuzzleState;
use super::types::error::Result;
use super::types::models::{Cell, Cursor, Metadata};

pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&PuzzleState)>;

/// Owns the undo history of one puzzle and tells subscribers about changes.
///
/// All edits go through here. Listeners are called with the new current
/// state after every successful edit, undo, redo or load; failed edits do
/// not notify.
pub struct Session {
    history: History<PuzzleState>,
    listeners: BTreeMap<SubscriptionId, Listener>,
    next_id: SubscriptionId,
    config: EditorConfig,
}

impl Session {
    pub fn new(state: PuzzleState, config: EditorConfig) -> Self {
        Self {
            history: History::with_limit(state, config.history_limit),
            listeners: BTreeMap::new(),
            next_id: 0,
            config,
        }
    }

    /// A session on a blank puzzle of the configured size.
    pub fn blank(config: EditorConfig) -> Self {
        Self::new(PuzzleState::new(config.default_size), config)
    }

    /// A session on a decoded `.puz` file.
    pub fn open(bytes: &[u8], config: EditorConfig) -> Result<Self> {
        let state = convert::decode_state(bytes, config.require_square)?;
        Ok(Self::new(state, config))
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn current(&self) -> &PuzzleState {
        self.history.current()
    }

    pub fn history(&self) -> &History<PuzzleState> {
        &self.history
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&PuzzleState) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.insert(id, Box::new(listener));
        debug!("Listener {} subscribed", id);
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    fn notify(&mut self) {
        let state = self.history.current();
        for listener in self.listeners.values_mut() {
            listener(state);
        }
    }

    /// Applies an arbitrary transition as one undoable step.
    pub fn apply<F>(&mut self, transition: F) -> Result<&PuzzleState>
    where
        F: FnOnce(&PuzzleState) -> Result<PuzzleState>,
    {
        self.history.apply(transition)?;
        self.notify();
        Ok(self.history.current())
    }

    /// Writes a cell (with block symmetry) and moves the cursor onto it.
    pub fn set_cell(&mut self, cursor: Cursor, value: Cell) -> Result<&PuzzleState> {
        self.apply(|state| state.set_cell(cursor.location, value)?.set_cursor(cursor))
    }

    /// Replaces a clue and moves the cursor onto its word.
    pub fn set_clue(&mut self, cursor: Cursor, text: impl Into<String>) -> Result<&PuzzleState> {
        let text = text.into();
        self.apply(|state| state.set_clue(cursor, text)?.set_cursor(cursor))
    }

    pub fn set_cursor(&mut self, cursor: Cursor) -> Result<&PuzzleState> {
        self.apply(|state| state.set_cursor(cursor))
    }

    pub fn set_metadata(&mut self, metadata: Metadata) -> Result<&PuzzleState> {
        self.apply(|state| Ok(state.set_metadata(metadata)))
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo();
        if changed {
            self.notify();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo();
        if changed {
            self.notify();
        }
        changed
    }

    /// Replaces the puzzle with a decoded file and forgets all history.
    pub fn load(&mut self, bytes: &[u8]) -> Result<&PuzzleState> {
        let state = convert::decode_state(bytes, self.config.require_square)?;
        info!("Session reset to loaded puzzle '{}'", state.metadata().title);
        self.history.reset(state);
        self.notify();
        Ok(self.history.current())
    }

    /// Encodes the current state as `.puz` bytes.
    pub fn export(&self) -> Result<Vec<u8>> {
        convert::encode_state(self.history.current())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::puz::types::error::PuzError;
    use crate::puz::types::models::{Location, Orientation};

    fn small_session() -> Session {
        Session::blank(EditorConfig {
            default_size: 3,
            ..EditorConfig::default()
        })
    }

    #[test]
    fn listeners_see_every_change() {
        let mut session = small_session();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.subscribe(move |state| sink.borrow_mut().push(state.cursor()));

        let target = Cursor::new(1, 2, Orientation::Down);
        session.set_cell(target, Cell::Letter('K')).unwrap();
        session.undo();
        session.redo();
        assert_eq!(
            *seen.borrow(),
            vec![target, Cursor::default(), target]
        );
    }

    #[test]
    fn failed_edits_do_not_notify_or_record() {
        let mut session = small_session();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        session.subscribe(move |_| *counter.borrow_mut() += 1);

        let interior = Cursor::new(1, 1, Orientation::Across);
        let err = session.set_clue(interior, "nope").unwrap_err();
        assert!(matches!(err, PuzError::InvalidClueTarget(_)));
        assert_eq!(*calls.borrow(), 0);
        assert!(!session.history().can_undo());
    }

    #[test]
    fn unsubscribed_listeners_stop_hearing() {
        let mut session = small_session();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let id = session.subscribe(move |_| *counter.borrow_mut() += 1);
        assert!(session.unsubscribe(id));
        session.set_cursor(Cursor::new(2, 2, Orientation::Across)).unwrap();
        assert_eq!(*calls.borrow(), 0);
        assert!(!session.unsubscribe(id));
    }

    #[test]
    fn set_clue_moves_the_cursor_to_the_word() {
        let mut session = small_session();
        let word = Cursor::new(0, 2, Orientation::Down);
        let state = session.set_clue(word, "Right edge").unwrap();
        assert_eq!(state.cursor(), word);
        assert_eq!(state.clues().get(&word), Some("Right edge"));
    }

    #[test]
    fn export_and_load_round_trip() {
        let mut session = small_session();
        session
            .set_cell(Cursor::new(0, 0, Orientation::Across), Cell::Block)
            .unwrap();
        let bytes = session.export().unwrap();

        let mut other = small_session();
        other.set_cursor(Cursor::new(1, 1, Orientation::Across)).unwrap();
        let loaded = other.load(&bytes).unwrap();
        assert_eq!(loaded.grid().get(Location::new(2, 2)).unwrap(), Cell::Block);
        assert!(!other.history().can_undo());
    }

    #[test]
    fn history_limit_comes_from_config() {
        let mut session = Session::blank(EditorConfig {
            default_size: 2,
            history_limit: Some(1),
            ..EditorConfig::default()
        });
        session.set_cursor(Cursor::new(0, 1, Orientation::Across)).unwrap();
        session.set_cursor(Cursor::new(1, 1, Orientation::Across)).unwrap();
        assert!(session.undo());
        assert!(!session.undo());
        assert_eq!(session.current().cursor(), Cursor::new(0, 1, Orientation::Across));
    }
}
