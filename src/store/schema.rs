//! Database schema and demo catalogue

/// Stored in `PRAGMA user_version` by `init_schema`
pub const SCHEMA_VERSION: i64 = 1;

/// Tables used by the clerk console
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS publisher (
    id    INTEGER PRIMARY KEY,
    name  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS book (
    isbn          TEXT PRIMARY KEY,
    title         TEXT NOT NULL,
    price         TEXT NOT NULL,
    quantity      INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0),
    year          INTEGER,
    publisher_id  INTEGER REFERENCES publisher(id)
);

CREATE TABLE IF NOT EXISTS author (
    id    INTEGER PRIMARY KEY,
    name  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS book_author (
    isbn       TEXT NOT NULL REFERENCES book(isbn),
    author_id  INTEGER NOT NULL REFERENCES author(id),
    PRIMARY KEY (isbn, author_id)
);

CREATE TABLE IF NOT EXISTS history_of_purchasing (
    id    INTEGER PRIMARY KEY,
    isbn  TEXT NOT NULL REFERENCES book(isbn),
    date  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS history_of_purchasing_isbn_date
    ON history_of_purchasing (isbn, date);

CREATE TABLE IF NOT EXISTS clerk (
    id             INTEGER PRIMARY KEY,
    password_hash  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS request (
    isbn      TEXT NOT NULL REFERENCES book(isbn),
    clerk_id  INTEGER NOT NULL REFERENCES clerk(id),
    quantity  INTEGER NOT NULL CHECK (quantity > 0),
    PRIMARY KEY (isbn, clerk_id)
);

CREATE TABLE IF NOT EXISTS bundle (
    id        INTEGER PRIMARY KEY,
    name      TEXT NOT NULL CHECK (length(name) > 0),
    comment   TEXT NOT NULL DEFAULT '',
    clerk_id  INTEGER NOT NULL REFERENCES clerk(id)
);

CREATE TABLE IF NOT EXISTS bundle_book (
    bundle_id  INTEGER NOT NULL REFERENCES bundle(id),
    isbn       TEXT NOT NULL REFERENCES book(isbn),
    discount   TEXT NOT NULL,
    PRIMARY KEY (bundle_id, isbn)
);
";

/// A demo book: isbn, title, price, stock, year, publisher, authors, purchases
pub struct SampleBook {
    pub isbn: &'static str,
    pub title: &'static str,
    pub price: &'static str,
    pub quantity: i64,
    pub year: i32,
    pub publisher: &'static str,
    pub authors: &'static [&'static str],
    pub purchases: u32,
}

/// Small catalogue covering both presets: a few fast sellers running low and
/// a few slow sellers piling up
pub const SAMPLE_BOOKS: &[SampleBook] = &[
    SampleBook {
        isbn: "978-0-13-110362-7",
        title: "The C Programming Language",
        price: "54.99",
        quantity: 4,
        year: 1988,
        publisher: "Prentice Hall",
        authors: &["Brian W. Kernighan", "Dennis M. Ritchie"],
        purchases: 22,
    },
    SampleBook {
        isbn: "978-1-59327-828-1",
        title: "The Rust Programming Language",
        price: "39.95",
        quantity: 8,
        year: 2018,
        publisher: "No Starch Press",
        authors: &["Steve Klabnik", "Carol Nichols"],
        purchases: 17,
    },
    SampleBook {
        isbn: "978-0-201-63361-0",
        title: "Design Patterns",
        price: "49.99",
        quantity: 25,
        year: 1994,
        publisher: "Addison-Wesley",
        authors: &[
            "Erich Gamma",
            "Richard Helm",
            "Ralph Johnson",
            "John Vlissides",
        ],
        purchases: 9,
    },
    SampleBook {
        isbn: "978-0-262-03384-8",
        title: "Introduction to Algorithms",
        price: "89.00",
        quantity: 31,
        year: 2009,
        publisher: "MIT Press",
        authors: &[
            "Thomas H. Cormen",
            "Charles E. Leiserson",
            "Ronald L. Rivest",
            "Clifford Stein",
        ],
        purchases: 3,
    },
    SampleBook {
        isbn: "978-0-596-51774-8",
        title: "JavaScript: The Good Parts",
        price: "29.99",
        quantity: 12,
        year: 2008,
        publisher: "O'Reilly Media",
        authors: &["Douglas Crockford"],
        purchases: 1,
    },
    SampleBook {
        isbn: "978-0-321-12742-6",
        title: "Effective C++",
        price: "44.99",
        quantity: 2,
        year: 2005,
        publisher: "Addison-Wesley",
        authors: &["Scott Meyers"],
        purchases: 6,
    },
];
