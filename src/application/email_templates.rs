use url::Url;

const BRAND_NAME: &str = "CaixaHub";
const BRAND_TAGLINE: &str = "Smart financial management";
const CONTACT_EMAIL: &str = "contato@caixahub.com.br";

/// Everything the welcome email shows. `full_name` and `company_name` are user
/// input and get escaped before they reach the markup.
pub struct WelcomeEmail<'a> {
    pub full_name: &'a str,
    pub company_name: &'a str,
    pub position: i64,
    pub verification_url: &'a str,
    pub referral_url: &'a str,
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `{app_url}?ref=<email>`, the link a signup shares to move up the queue.
pub fn referral_url(app_url: &Url, email: &str) -> String {
    let mut url = app_url.clone();
    url.query_pairs_mut().clear().append_pair("ref", email);
    url.to_string()
}

pub fn primary_button(url: &str, label: &str) -> String {
    format!(
        r#"<a href="{url}" style="display:inline-block;padding:12px 30px;background:linear-gradient(135deg,#10b981 0%,#3b82f6 100%);color:#ffffff;text-decoration:none;border-radius:6px;font-weight:600;">{label}</a>"#
    )
}

pub fn waitlist_welcome_email(email: &WelcomeEmail<'_>) -> (String, String) {
    let subject = format!("Welcome to the {} waitlist!", BRAND_NAME);
    let full_name = escape_html(email.full_name);
    let company_name = escape_html(email.company_name);
    let verification_url = escape_html(email.verification_url);
    let referral_url = escape_html(email.referral_url);

    let button = primary_button(&verification_url, "Confirm my email");
    let position = email.position;

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Welcome to {brand}</title>
  </head>
  <body style="font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,Arial,sans-serif;line-height:1.6;color:#333;max-width:600px;margin:0 auto;padding:20px;">
    <div style="background:linear-gradient(135deg,#10b981 0%,#3b82f6 100%);padding:30px;border-radius:10px 10px 0 0;text-align:center;">
      <h1 style="color:#ffffff;margin:0;font-size:28px;">{brand}</h1>
      <p style="color:#ffffff;margin:10px 0 0;opacity:0.9;">{tagline}</p>
    </div>
    <div style="background:#ffffff;padding:30px;border:1px solid #e5e7eb;border-radius:0 0 10px 10px;">
      <h2 style="color:#111827;margin-top:0;">Hi {full_name}!</h2>
      <p style="color:#4b5563;font-size:16px;">You just took the first step towards better financial management at <strong>{company_name}</strong>.</p>
      <div style="background:#f3f4f6;padding:20px;border-radius:8px;margin:20px 0;">
        <p style="margin:0;color:#374151;text-align:center;">
          <strong>Your position in line:</strong><br>
          <span style="font-size:36px;color:#10b981;font-weight:bold;">#{position}</span>
        </p>
      </div>
      <p style="color:#4b5563;"><strong>Please confirm your email by clicking the button below:</strong></p>
      <div style="text-align:center;margin:30px 0;">{button}</div>
      <div style="background:#fef3c7;border-left:4px solid #f59e0b;padding:15px;margin:20px 0;">
        <p style="margin:0;color:#92400e;"><strong>Tip:</strong> share with other business owners and move up the line.</p>
      </div>
      <p style="color:#4b5563;margin-top:30px;">
        Your referral link:<br>
        <code style="background:#f3f4f6;padding:10px;border-radius:4px;display:block;margin-top:10px;word-break:break-all;">{referral_url}</code>
      </p>
      <hr style="border:none;border-top:1px solid #e5e7eb;margin:30px 0;">
      <p style="color:#6b7280;font-size:14px;text-align:center;">
        Questions? Reply to this email or write to <a href="mailto:{contact}" style="color:#3b82f6;">{contact}</a>
      </p>
    </div>
    <div style="text-align:center;margin-top:20px;color:#9ca3af;font-size:12px;">
      <p>You received this email because you joined the {brand} waitlist.</p>
    </div>
  </body>
</html>
"#,
        brand = BRAND_NAME,
        tagline = BRAND_TAGLINE,
        contact = CONTACT_EMAIL,
    );

    (subject, html)
}
