use bookshelf_core::{Book, BookDraft, BookValidationError};

#[test]
fn draft_new_sets_defaults() {
    let draft = BookDraft::new("The Dispossessed", "Ursula K. Le Guin");

    assert_eq!(draft.title, "The Dispossessed");
    assert_eq!(draft.author, "Ursula K. Le Guin");
    assert_eq!(draft.genre, None);
    assert_eq!(draft.year, None);
    assert!(draft.validate().is_ok());
}

#[test]
fn validate_requires_title_and_author_presence() {
    let mut draft = BookDraft::new("", "A");
    assert_eq!(draft.validate(), Err(BookValidationError::MissingTitle));

    draft.title = "   ".to_string();
    assert_eq!(
        draft.validate(),
        Err(BookValidationError::MissingTitle),
        "whitespace-only titles are absent titles"
    );

    draft.title = "T".to_string();
    draft.author = String::new();
    assert_eq!(draft.validate(), Err(BookValidationError::MissingAuthor));
}

#[test]
fn to_draft_round_trips_every_editable_field() {
    let book = Book {
        id: 7,
        title: "T".to_string(),
        author: "A".to_string(),
        genre: Some("G".to_string()),
        year: Some(1999),
    };

    let draft = book.to_draft();
    assert_eq!(draft.title, book.title);
    assert_eq!(draft.author, book.author);
    assert_eq!(draft.genre, book.genre);
    assert_eq!(draft.year, book.year);
}

#[test]
fn book_serialization_uses_expected_wire_fields() {
    let book = Book {
        id: 42,
        title: "T".to_string(),
        author: "A".to_string(),
        genre: None,
        year: Some(1999),
    };

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["id"], 42);
    assert_eq!(json["title"], "T");
    assert_eq!(json["author"], "A");
    assert!(json["genre"].is_null());
    assert_eq!(json["year"], 1999);

    let back: Book = serde_json::from_value(json).unwrap();
    assert_eq!(back, book);
}
