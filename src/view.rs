//! Server-rendered pages
//!
//! Templates live in `templates/` and extend `base.html`, which reads
//! `account_id` to decide between the login/register links and the logout
//! button.

use askama::Template;

use crate::model::UrlRecord;

#[derive(Template)]
#[template(path = "urls_index.html")]
pub struct UrlsIndex {
    pub urls: Vec<UrlRecord>,
    pub account_id: Option<String>,
}

#[derive(Template)]
#[template(path = "urls_new.html")]
pub struct UrlsNew {
    pub account_id: Option<String>,
}

#[derive(Template)]
#[template(path = "urls_show.html")]
pub struct UrlsShow {
    pub url: UrlRecord,
    pub account_id: Option<String>,
    /// Whether the viewer may edit or delete the record
    pub can_edit: bool,
}

#[derive(Template)]
#[template(path = "urls_login.html")]
pub struct UrlsLogin {
    pub account_id: Option<String>,
}

#[derive(Template)]
#[template(path = "urls_register.html")]
pub struct UrlsRegister {
    pub account_id: Option<String>,
}
