pub mod url_sync;
