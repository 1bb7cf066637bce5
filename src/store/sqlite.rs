//! SQLite-backed implementation of the persistence collaborators

use std::path::Path;
use std::str::FromStr;

use rusqlite::{Connection, OptionalExtension, named_params, params};
use rust_decimal::Decimal;

use super::schema::{SAMPLE_BOOKS, SCHEMA, SCHEMA_VERSION};
use super::{
    Authenticator, BookCatalog, BookDetails, BookQuery, BookRow, BundleStore, BundleSummary,
    RequestOutcome, RequestStore, RestockRequest,
};
use crate::auth::{ClerkId, PasswordDigest};
use crate::error::{Result, book_not_found, database_open_failed, persist_failed, query_failed};
use crate::filter::{DATE_FORMAT, DateRange, EffectiveQueryBounds};
use crate::ledger::BundleItem;

const SEARCH_SQL: &str = "
SELECT   book.isbn, count(*), max(book.quantity)
FROM     history_of_purchasing JOIN book ON book.isbn = history_of_purchasing.isbn
WHERE    (history_of_purchasing.date BETWEEN :from_date AND :to_date)
     AND (book.quantity BETWEEN :from_stock AND :to_stock)
GROUP BY book.isbn
HAVING   count(*) BETWEEN :from_bought AND :to_bought
ORDER BY book.isbn";

/// Owns the database connection for one process
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| database_open_failed(path.display().to_string(), e.to_string()))?;
        }
        let conn = Connection::open(path)
            .map_err(|e| database_open_failed(path.display().to_string(), e.to_string()))?;
        tracing::debug!(path = %path.display(), "opened database");
        Self::from_connection(conn)
    }

    /// Private in-memory database, used by tests
    #[allow(dead_code)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| database_open_failed(":memory:", e.to_string()))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self { conn })
    }

    /// Create any missing tables
    pub fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.conn
            .pragma_update(None, "user_version", SCHEMA_VERSION)?;
        Ok(())
    }

    /// `PRAGMA user_version`; 0 until `init_schema` has run
    pub fn schema_version(&self) -> Result<i64> {
        Ok(self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?)
    }

    /// Load the demo catalogue, replacing books with the same ISBN
    pub fn load_sample(&self) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        for book in SAMPLE_BOOKS {
            tx.execute(
                "INSERT OR IGNORE INTO publisher (name) VALUES (?1)",
                params![book.publisher],
            )?;
            let publisher_id: i64 = tx.query_row(
                "SELECT id FROM publisher WHERE name = ?1",
                params![book.publisher],
                |row| row.get(0),
            )?;

            tx.execute(
                "DELETE FROM history_of_purchasing WHERE isbn = ?1",
                params![book.isbn],
            )?;
            tx.execute("DELETE FROM book_author WHERE isbn = ?1", params![book.isbn])?;
            tx.execute(
                "INSERT INTO book (isbn, title, price, quantity, year, publisher_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT (isbn) DO UPDATE SET
                    title = excluded.title, price = excluded.price,
                    quantity = excluded.quantity, year = excluded.year,
                    publisher_id = excluded.publisher_id",
                params![
                    book.isbn,
                    book.title,
                    book.price,
                    book.quantity,
                    book.year,
                    publisher_id
                ],
            )?;

            for name in book.authors {
                let author_id: Option<i64> = tx
                    .query_row(
                        "SELECT id FROM author WHERE name = ?1",
                        params![name],
                        |row| row.get(0),
                    )
                    .optional()?;
                let author_id = match author_id {
                    Some(id) => id,
                    None => {
                        tx.execute("INSERT INTO author (name) VALUES (?1)", params![name])?;
                        tx.last_insert_rowid()
                    }
                };
                tx.execute(
                    "INSERT INTO book_author (isbn, author_id) VALUES (?1, ?2)",
                    params![book.isbn, author_id],
                )?;
            }

            for i in 0..book.purchases {
                let date = format!("2023-{:02}-{:02}", 1 + i % 12, 1 + i % 28);
                tx.execute(
                    "INSERT INTO history_of_purchasing (isbn, date) VALUES (?1, ?2)",
                    params![book.isbn, date],
                )?;
            }
        }
        tx.commit()?;
        tracing::info!(books = SAMPLE_BOOKS.len(), "loaded sample catalogue");
        Ok(SAMPLE_BOOKS.len())
    }

    /// Create a clerk or replace its password
    pub fn upsert_clerk(&self, clerk: ClerkId, digest: &PasswordDigest) -> Result<()> {
        self.conn.execute(
            "INSERT INTO clerk (id, password_hash) VALUES (?1, ?2)
             ON CONFLICT (id) DO UPDATE SET password_hash = excluded.password_hash",
            params![clerk, digest.as_str()],
        )?;
        tracing::info!(clerk, "stored clerk credentials");
        Ok(())
    }

    /// Record a purchase of a book on a date
    #[allow(dead_code)]
    pub fn record_purchase(&self, isbn: &str, date: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO history_of_purchasing (isbn, date) VALUES (?1, ?2)",
            params![isbn, date],
        )?;
        Ok(())
    }

    fn book_exists(&self, isbn: &str) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM book WHERE isbn = ?1",
                params![isbn],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

fn parse_decimal(column: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw).map_err(|e| query_failed(format!("bad {column} value '{raw}': {e}")))
}

impl BookQuery for SqliteStore {
    fn search(&self, bounds: &EffectiveQueryBounds, dates: &DateRange) -> Result<Vec<BookRow>> {
        let from = dates.from().format(DATE_FORMAT).to_string();
        let to = dates.to().format(DATE_FORMAT).to_string();
        let mut stmt = self.conn.prepare_cached(SEARCH_SQL)?;
        let rows = stmt
            .query_map(
                named_params! {
                    ":from_date": from,
                    ":to_date": to,
                    ":from_stock": bounds.from_stock,
                    ":to_stock": bounds.to_stock,
                    ":from_bought": bounds.from_bought,
                    ":to_bought": bounds.to_bought,
                },
                |row| {
                    Ok(BookRow {
                        isbn: row.get(0)?,
                        sold_count: row.get(1)?,
                        quantity: row.get(2)?,
                    })
                },
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!(?bounds, %from, %to, rows = rows.len(), "search");
        Ok(rows)
    }
}

impl BookCatalog for SqliteStore {
    fn book_details(&self, isbn: &str) -> Result<BookDetails> {
        let row = self
            .conn
            .query_row(
                "SELECT book.title, book.price, book.quantity, book.year, publisher.name
                 FROM book LEFT JOIN publisher ON publisher.id = book.publisher_id
                 WHERE book.isbn = ?1",
                params![isbn],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, Option<i32>>(3)?,
                        row.get::<_, Option<String>>(4)?,
                    ))
                },
            )
            .optional()?;
        let Some((title, price, quantity, year, publisher)) = row else {
            return Err(book_not_found(isbn));
        };

        let mut stmt = self.conn.prepare_cached(
            "SELECT author.name FROM book_author JOIN author ON author.id = book_author.author_id
             WHERE book_author.isbn = ?1 ORDER BY author.name",
        )?;
        let authors = stmt
            .query_map(params![isbn], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(BookDetails {
            isbn: isbn.to_string(),
            title,
            price: parse_decimal("price", &price)?,
            quantity,
            year,
            publisher,
            authors,
        })
    }
}

impl RequestStore for SqliteStore {
    fn fill_request(&self, isbn: &str, quantity: u32, clerk: ClerkId) -> Result<RequestOutcome> {
        if !self.book_exists(isbn)? {
            return Err(book_not_found(isbn));
        }

        let write = || -> rusqlite::Result<RequestOutcome> {
            let tx = self.conn.unchecked_transaction()?;
            let existing: Option<u32> = tx
                .query_row(
                    "SELECT quantity FROM request WHERE isbn = ?1 AND clerk_id = ?2",
                    params![isbn, clerk],
                    |row| row.get(0),
                )
                .optional()?;

            let outcome = match (existing, quantity) {
                (None, 0) => RequestOutcome::Unchanged,
                (Some(_), 0) => {
                    tx.execute(
                        "DELETE FROM request WHERE isbn = ?1 AND clerk_id = ?2",
                        params![isbn, clerk],
                    )?;
                    RequestOutcome::Removed
                }
                (Some(_), _) => {
                    tx.execute(
                        "UPDATE request SET quantity = ?3 WHERE isbn = ?1 AND clerk_id = ?2",
                        params![isbn, clerk, quantity],
                    )?;
                    RequestOutcome::Updated
                }
                (None, _) => {
                    tx.execute(
                        "INSERT INTO request (isbn, clerk_id, quantity) VALUES (?1, ?2, ?3)",
                        params![isbn, clerk, quantity],
                    )?;
                    RequestOutcome::Inserted
                }
            };
            tx.commit()?;
            Ok(outcome)
        };

        let outcome = write().map_err(|e| persist_failed(format!("request for {isbn}"), e))?;
        tracing::info!(isbn, quantity, clerk, ?outcome, "restock request written");
        Ok(outcome)
    }

    fn requests(&self, clerk: ClerkId) -> Result<Vec<RestockRequest>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT request.isbn, book.title, request.quantity
             FROM request JOIN book ON book.isbn = request.isbn
             WHERE request.clerk_id = ?1 ORDER BY request.isbn",
        )?;
        let requests = stmt
            .query_map(params![clerk], |row| {
                Ok(RestockRequest {
                    isbn: row.get(0)?,
                    title: row.get(1)?,
                    clerk,
                    quantity: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(requests)
    }
}

impl BundleStore for SqliteStore {
    fn save_bundle(
        &self,
        name: &str,
        comment: &str,
        clerk: ClerkId,
        items: &[BundleItem],
    ) -> Result<i64> {
        // The transaction rolls back when dropped without a commit
        let write = || -> rusqlite::Result<i64> {
            let tx = self.conn.unchecked_transaction()?;
            tx.execute(
                "INSERT INTO bundle (name, comment, clerk_id) VALUES (?1, ?2, ?3)",
                params![name, comment, clerk],
            )?;
            let bundle_id = tx.last_insert_rowid();
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO bundle_book (bundle_id, isbn, discount) VALUES (?1, ?2, ?3)",
                )?;
                for item in items {
                    stmt.execute(params![bundle_id, item.isbn(), item.discount().to_string()])?;
                }
            }
            tx.commit()?;
            Ok(bundle_id)
        };

        let bundle_id = write().map_err(|e| persist_failed(format!("bundle '{name}'"), e))?;
        tracing::info!(bundle_id, name, clerk, books = items.len(), "bundle saved");
        Ok(bundle_id)
    }

    fn bundles(&self) -> Result<Vec<BundleSummary>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT bundle.id, bundle.name, bundle.comment, bundle.clerk_id, count(bundle_book.isbn)
             FROM bundle LEFT JOIN bundle_book ON bundle_book.bundle_id = bundle.id
             GROUP BY bundle.id ORDER BY bundle.id",
        )?;
        let bundles = stmt
            .query_map([], |row| {
                Ok(BundleSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    comment: row.get(2)?,
                    clerk: row.get(3)?,
                    item_count: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(bundles)
    }
}

impl Authenticator for SqliteStore {
    fn authenticate(&self, clerk: ClerkId, digest: &PasswordDigest) -> Result<bool> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT password_hash FROM clerk WHERE id = ?1",
                params![clerk],
                |row| row.get(0),
            )
            .optional()?;
        let accepted = stored.is_some_and(|hash| PasswordDigest::from_hex(hash) == *digest);
        tracing::info!(clerk, accepted, "login attempt");
        Ok(accepted)
    }
}
