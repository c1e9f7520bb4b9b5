use puz_editor::puz::codec::checksum;
use puz_editor::{
    decode, decode_state, encode, encode_state, Cell, ChecksumKind, Cursor, EditorConfig, FileStore,
    Location, MemoryStore, Orientation, PuzError, PuzzleState, Session, StateStore,
};
use std::cell::Cell as Counter;
use std::rc::Rc;

/// 3x3 open grid, solution CAT/AGE/TEN, title "Tiny", author "Tester",
/// six clues in canonical order.
const TINY: [u8; 102] = [
    229, 2, 65, 67, 82, 79, 83, 83, 38, 68, 79, 87, 78, 0, 0, 98, 73, 213, 17, 104, 35, 249, 150,
    150, 49, 46, 51, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 3, 3, 6, 0, 1, 0, 0, 0,
    67, 65, 84, 65, 71, 69, 84, 69, 78, 45, 45, 45, 45, 45, 45, 45, 45, 45, 84, 105, 110, 121, 0,
    84, 101, 115, 116, 101, 114, 0, 0, 49, 65, 0, 49, 68, 0, 50, 68, 0, 51, 68, 0, 52, 65, 0, 53,
    65, 0, 0,
];

/// 3x3 with blocks at (0,2) and (2,0), partial player fill, copyright and
/// notes, a 3-byte preamble "PRE" and a 6-byte postscript.
const BLOCKED: [u8; 130] = [
    80, 82, 69, 25, 169, 65, 67, 82, 79, 83, 83, 38, 68, 79, 87, 78, 0, 0, 98, 73, 198, 21, 220,
    35, 161, 110, 127, 49, 46, 51, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 3, 3, 6, 0,
    1, 0, 0, 0, 65, 66, 46, 67, 68, 69, 46, 70, 71, 65, 45, 46, 45, 45, 69, 46, 45, 45, 66, 108,
    111, 99, 107, 115, 0, 0, 40, 99, 41, 32, 50, 48, 50, 52, 0, 80, 97, 105, 114, 0, 76, 101,
    102, 116, 0, 77, 105, 100, 100, 108, 101, 0, 82, 111, 119, 0, 82, 105, 103, 104, 116, 0, 69,
    110, 100, 0, 72, 105, 0, 71, 69, 88, 84, 1, 0,
];

fn config() -> EditorConfig {
    EditorConfig::default()
}

#[test]
fn tiny_fixture_decodes_with_hand_computed_checksums() {
    let record = decode(&TINY).unwrap();
    assert_eq!((record.width, record.height), (3, 3));
    assert_eq!(record.solution, "CATAGETEN");
    assert_eq!(record.title, "Tiny");
    assert_eq!(record.author, "Tester");
    assert_eq!(record.clues, ["1A", "1D", "2D", "3D", "4A", "5A"]);
    assert_eq!(checksum::file_checksum(&record).unwrap(), 0x02e5);

    let sections = checksum::section_checksums(&record).unwrap();
    assert_eq!(sections.header, 0x6200);
    assert_eq!(sections.solution, 0xad96);
    assert_eq!(sections.state, 0xd359);
    assert_eq!(
        checksum::magic_checksum(&sections),
        [0x49, 0xd5, 0x11, 0x68, 0x23, 0xf9, 0x96, 0x96]
    );
}

#[test]
fn tiny_fixture_edit_scenario() {
    let state = decode_state(&TINY, true).unwrap();

    let words = state.word_info().unwrap();
    let first = words.across().word(1).unwrap();
    assert_eq!(first.text(), "CAT");
    assert_eq!(
        first.cells.iter().map(|(loc, _)| *loc).collect::<Vec<_>>(),
        [Location::new(0, 0), Location::new(0, 1), Location::new(0, 2)]
    );
    assert_eq!(first.clue, "1A");
    assert_eq!(words.down().word(3).unwrap().clue, "3D");

    let interior = Cursor::new(1, 1, Orientation::Across);
    assert!(matches!(
        state.set_clue(interior, "x"),
        Err(PuzError::InvalidClueTarget(c)) if c == interior
    ));

    assert_eq!(encode_state(&state).unwrap(), TINY);
    assert_eq!(encode(&decode(&TINY).unwrap()).unwrap(), TINY);
}

#[test]
fn blocked_fixture_keeps_everything_it_does_not_model() {
    let record = decode(&BLOCKED).unwrap();
    assert_eq!(record.preamble, b"PRE");
    assert_eq!(record.postscript, b"GEXT\x01\x00");
    assert_eq!(record.copyright, "(c) 2024");
    assert_eq!(record.notes, "Hi");

    let state = decode_state(&BLOCKED, true).unwrap();
    assert_eq!(state.grid().get(Location::new(0, 2)).unwrap(), Cell::Block);
    assert_eq!(state.grid().get(Location::new(2, 0)).unwrap(), Cell::Block);

    let expected = [
        (Cursor::new(0, 0, Orientation::Across), "Pair"),
        (Cursor::new(0, 0, Orientation::Down), "Left"),
        (Cursor::new(0, 1, Orientation::Down), "Middle"),
        (Cursor::new(1, 0, Orientation::Across), "Row"),
        (Cursor::new(1, 2, Orientation::Down), "Right"),
        (Cursor::new(2, 1, Orientation::Across), "End"),
    ];
    assert_eq!(state.clues().iter().collect::<Vec<_>>(), expected);

    let words = state.word_info().unwrap();
    assert_eq!(words.across().word(3).unwrap().text(), "CDE");
    assert_eq!(words.down().word(4).unwrap().text(), "EG");

    assert_eq!(encode_state(&state).unwrap(), BLOCKED);
}

#[test]
fn edits_re_encode_with_fresh_checksums() {
    let state = decode_state(&BLOCKED, true).unwrap();
    let edited = state
        .set_clue(Cursor::new(1, 0, Orientation::Across), "Middle row")
        .unwrap()
        .set_cell(Location::new(1, 1), Cell::Letter('X'))
        .unwrap();
    let bytes = encode_state(&edited).unwrap();
    assert_eq!(bytes.len(), BLOCKED.len() + "Middle row".len() - "Row".len());

    let reloaded = decode(&bytes).unwrap();
    assert_eq!(reloaded.solution, "AB.CXE.FG");
    assert_eq!(reloaded.state, "A-.--E.--");
    assert_eq!(reloaded.clues[3], "Middle row");
    assert_eq!(reloaded.preamble, b"PRE");
    assert_eq!(reloaded.postscript, b"GEXT\x01\x00");
}

#[test]
fn corrupted_fixtures_are_rejected() {
    let mut bytes = TINY.to_vec();
    // Inside the clue text: only the file checksum covers it directly.
    bytes[83] ^= 0x01;
    assert!(matches!(
        decode(&bytes),
        Err(PuzError::ChecksumMismatch { kind: ChecksumKind::File, .. })
    ));

    assert!(matches!(decode(&TINY[..60]), Err(PuzError::UnexpectedEof { .. })));
    assert!(matches!(decode(b"ACROSS&DOW"), Err(PuzError::MagicNotFound)));
}

#[test]
fn blank_one_by_one_matches_known_bytes() {
    let bytes = encode_state(&PuzzleState::new(1)).unwrap();
    assert_eq!(bytes.len(), 60);
    assert_eq!(bytes[..2], [0xc3, 0x8d]);
    assert_eq!(bytes[14..16], [0x00, 0x36]);
    assert_eq!(bytes[16..24], [0x49, 0x6e, 0x65, 0x45, 0x77, 0x54, 0x45, 0x44]);

    let state = decode_state(&bytes, true).unwrap();
    assert_eq!(state.clues().len(), 2);
}

#[test]
fn session_edits_undo_and_export() {
    let mut session = Session::open(&TINY, config()).unwrap();
    let notified = Rc::new(Counter::new(0));
    let counter = Rc::clone(&notified);
    session.subscribe(move |_| counter.set(counter.get() + 1));

    let corner = Cursor::new(0, 0, Orientation::Down);
    session.set_cell(corner, Cell::Block).unwrap();
    assert_eq!(session.current().grid().get(Location::new(2, 2)).unwrap(), Cell::Block);
    assert_eq!(session.current().cursor(), corner);

    session
        .set_clue(Cursor::new(0, 1, Orientation::Across), "Now a pair")
        .unwrap();
    assert_eq!(notified.get(), 2);

    assert!(session.undo());
    assert!(session.undo());
    assert!(!session.undo());
    assert_eq!(notified.get(), 4);
    assert_eq!(session.export().unwrap(), TINY);

    assert!(session.redo());
    let store = MemoryStore::new();
    store.save(session.current()).unwrap();
    let restored = store.load().unwrap().unwrap();
    assert_eq!(restored.grid(), session.current().grid());
}

#[test]
fn blank_puzzles_survive_both_stores() {
    let dir = tempfile::tempdir().unwrap();
    let file_store = FileStore::new(dir.path().join("blank.puz"), &config());
    let memory_store = MemoryStore::new();

    for size in [1, 4, 15] {
        let blank = PuzzleState::new(size);
        let stores: [&dyn StateStore; 2] = [&memory_store, &file_store];
        for store in stores {
            store.save(&blank).unwrap();
            let restored = store.load().unwrap().unwrap();
            assert_eq!(restored.grid(), blank.grid());
            assert_eq!(restored.clues(), blank.clues());
            assert!(restored.grid().cells().all(|(_, cell)| cell == Cell::Empty));
        }
    }
}
