pub(crate) mod admin_articles;
pub(crate) mod article_detail;
pub(crate) mod article_form;
pub(crate) mod articles;
pub(crate) mod categories;
pub(crate) mod home;
pub(crate) mod login;
pub(crate) mod not_found;
pub(crate) mod profile;
pub(crate) mod register;
