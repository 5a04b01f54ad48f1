//! C-compatible handle API.
//!
//! A thin `extern "C"` surface over [`SearchDatabase`] for cross-language
//! consumers: an opaque handle created with `use_stemming` /
//! `use_compression` flags, document and title accessors, TF-IDF and
//! Boolean query entry points returning owned arrays, and hex-encoded
//! compress/decompress helpers.
//!
//! Ownership rules: every pointer returned by this module is owned by the
//! library and must be released through the matching free function
//! ([`quarry_string_free`], [`quarry_hit_list_free`],
//! [`quarry_doc_id_list_free`], [`quarry_db_destroy`]). Null handles and
//! null string arguments are treated as empty inputs and never
//! dereferenced.

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};

use quarry_types::DocId;

use crate::analyzer::PipelineOptions;
use crate::database::{DatabaseOptions, SearchDatabase};
use crate::lzw::Lzw;

/// One ranked result crossing the FFI boundary.
#[repr(C)]
pub struct QuarryHit {
    /// Document identifier.
    pub doc_id: usize,
    /// TF-IDF score.
    pub score: f64,
}

/// Owned array of ranked results.
#[repr(C)]
pub struct QuarryHitList {
    /// Pointer to `len` hits.
    pub hits: *mut QuarryHit,
    /// Number of hits.
    pub len: usize,
}

/// Owned array of document identifiers.
#[repr(C)]
pub struct QuarryDocIdList {
    /// Pointer to `len` identifiers.
    pub doc_ids: *mut usize,
    /// Number of identifiers.
    pub len: usize,
}

/// Copies a possibly-null C string argument into an owned `String`.
unsafe fn string_arg(ptr: *const c_char) -> String {
    if ptr.is_null() {
        String::new()
    } else {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

/// Allocates an owned C string; interior NULs degrade to the empty string.
fn owned_cstring(s: &str) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

fn encode_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

/// Decodes pairwise hex; `None` on odd length or any non-hex character.
fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

/// Creates a database handle.
///
/// `use_stemming` toggles the Porter stemmer in the pipeline;
/// `use_compression` toggles LZW storage of document bodies.
#[no_mangle]
pub extern "C" fn quarry_db_create(use_stemming: c_int, use_compression: c_int) -> *mut SearchDatabase {
    let options = DatabaseOptions {
        pipeline: PipelineOptions {
            use_stemming: use_stemming != 0,
            ..Default::default()
        },
        compress_documents: use_compression != 0,
        ..Default::default()
    };
    Box::into_raw(Box::new(SearchDatabase::with_options(options)))
}

/// Destroys a handle created by [`quarry_db_create`]. Null is a no-op.
///
/// # Safety
///
/// `db` must be null or a handle from [`quarry_db_create`] that has not
/// been destroyed already.
#[no_mangle]
pub unsafe extern "C" fn quarry_db_destroy(db: *mut SearchDatabase) {
    if !db.is_null() {
        drop(Box::from_raw(db));
    }
}

/// Indexes a document; returns its identifier (0 on a null handle).
///
/// # Safety
///
/// `db` must be null or a live handle; `content` and `title` must be null
/// or NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn quarry_db_add_document(
    db: *mut SearchDatabase,
    content: *const c_char,
    title: *const c_char,
) -> usize {
    let Some(db) = db.as_mut() else { return 0 };
    let content = string_arg(content);
    let title = string_arg(title);
    db.add_document_with_title(&content, &title) as usize
}

/// Returns the stored document body (empty string when unavailable).
/// Free with [`quarry_string_free`].
///
/// # Safety
///
/// `db` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn quarry_db_get_document(
    db: *const SearchDatabase,
    doc_id: usize,
) -> *mut c_char {
    let Some(db) = db.as_ref() else {
        return owned_cstring("");
    };
    let body = DocId::try_from(doc_id)
        .ok()
        .and_then(|doc_id| db.get_document(doc_id))
        .unwrap_or_default();
    owned_cstring(&body)
}

/// Returns the stored title (empty string when unavailable).
/// Free with [`quarry_string_free`].
///
/// # Safety
///
/// `db` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn quarry_db_get_title(
    db: *const SearchDatabase,
    doc_id: usize,
) -> *mut c_char {
    let Some(db) = db.as_ref() else {
        return owned_cstring("");
    };
    let title = DocId::try_from(doc_id)
        .ok()
        .and_then(|doc_id| db.get_title(doc_id))
        .unwrap_or_default();
    owned_cstring(title)
}

/// Number of indexed documents (0 on a null handle).
///
/// # Safety
///
/// `db` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn quarry_db_doc_count(db: *const SearchDatabase) -> usize {
    db.as_ref().map_or(0, SearchDatabase::doc_count)
}

/// Runs a ranked TF-IDF search. Free the result with
/// [`quarry_hit_list_free`].
///
/// # Safety
///
/// `db` must be null or a live handle; `query` must be null or a
/// NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn quarry_db_search_tfidf(
    db: *const SearchDatabase,
    query: *const c_char,
    top_k: usize,
) -> *mut QuarryHitList {
    let hits = match db.as_ref() {
        Some(db) => db.search(&string_arg(query), top_k),
        None => Vec::new(),
    };

    let boxed: Box<[QuarryHit]> = hits
        .iter()
        .map(|hit| QuarryHit {
            doc_id: hit.doc_id as usize,
            score: hit.score,
        })
        .collect();
    let len = boxed.len();
    let hits = Box::into_raw(boxed) as *mut QuarryHit;
    Box::into_raw(Box::new(QuarryHitList { hits, len }))
}

/// Releases a list returned by [`quarry_db_search_tfidf`]. Null is a no-op.
///
/// # Safety
///
/// `list` must be null or an un-freed result of
/// [`quarry_db_search_tfidf`].
#[no_mangle]
pub unsafe extern "C" fn quarry_hit_list_free(list: *mut QuarryHitList) {
    if list.is_null() {
        return;
    }
    let list = Box::from_raw(list);
    drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(
        list.hits, list.len,
    )));
}

/// Evaluates a Boolean expression. Free the result with
/// [`quarry_doc_id_list_free`].
///
/// # Safety
///
/// `db` must be null or a live handle; `query` must be null or a
/// NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn quarry_db_boolean_query(
    db: *const SearchDatabase,
    query: *const c_char,
) -> *mut QuarryDocIdList {
    let doc_ids = match db.as_ref() {
        Some(db) => db.boolean_query(&string_arg(query)),
        None => Vec::new(),
    };

    let boxed: Box<[usize]> = doc_ids.iter().map(|&doc_id| doc_id as usize).collect();
    let len = boxed.len();
    let doc_ids = Box::into_raw(boxed) as *mut usize;
    Box::into_raw(Box::new(QuarryDocIdList { doc_ids, len }))
}

/// Releases a list returned by [`quarry_db_boolean_query`]. Null is a
/// no-op.
///
/// # Safety
///
/// `list` must be null or an un-freed result of
/// [`quarry_db_boolean_query`].
#[no_mangle]
pub unsafe extern "C" fn quarry_doc_id_list_free(list: *mut QuarryDocIdList) {
    if list.is_null() {
        return;
    }
    let list = Box::from_raw(list);
    drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(
        list.doc_ids,
        list.len,
    )));
}

/// Compresses `text` and returns the LZW frame as lowercase hex.
/// Null input returns null. Free with [`quarry_string_free`].
///
/// # Safety
///
/// `text` must be null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn quarry_compress_text(text: *const c_char) -> *mut c_char {
    if text.is_null() {
        return std::ptr::null_mut();
    }
    let frame = Lzw::new().compress(CStr::from_ptr(text).to_bytes());
    owned_cstring(&encode_hex(&frame))
}

/// Decompresses a hex-encoded LZW frame back into text.
///
/// Either hex case is accepted; odd length, non-hex characters, or a
/// malformed frame yield the empty string. Null input returns null.
/// Free with [`quarry_string_free`].
///
/// # Safety
///
/// `hex` must be null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn quarry_decompress_text(hex: *const c_char) -> *mut c_char {
    if hex.is_null() {
        return std::ptr::null_mut();
    }
    let text = decode_hex(&CStr::from_ptr(hex).to_string_lossy())
        .and_then(|frame| Lzw::new().decompress(&frame).ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default();
    owned_cstring(&text)
}

/// Releases a string returned by this module. Null is a no-op.
///
/// # Safety
///
/// `s` must be null or an un-freed string returned by this module.
#[no_mangle]
pub unsafe extern "C" fn quarry_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
