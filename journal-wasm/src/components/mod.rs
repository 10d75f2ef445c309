pub(crate) mod article_card;
pub(crate) mod confirm_dialog;
pub(crate) mod field_error;
pub(crate) mod nav;
pub(crate) mod notice;
pub(crate) mod pagination;
