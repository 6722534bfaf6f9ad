use askama::Template;

use crate::company::Company;

#[derive(Template)]
#[template(path = "email/company_register.html")]
struct CompanyRegisterMail<'a> {
    company_name: &'a str,
    company_url: String,
}

pub fn render_company_register(company: &Company, base_url: &str) -> Result<String, String> {
    CompanyRegisterMail {
        company_name: &company.name,
        company_url: format!(
            "{}/company/{}",
            base_url.trim_end_matches('/'),
            company.slug_name
        ),
    }
    .render()
    .map_err(|e| format!("Failed to render email: {e}"))
}
