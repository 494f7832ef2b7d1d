mod poll_cancel;
mod tag_catalog;
