use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::email::CompanyEmail;
use crate::frontpage::Frontpage;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub frontpage: Frontpage,
    pub company_email: Option<Arc<CompanyEmail>>,
}
