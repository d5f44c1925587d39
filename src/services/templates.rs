use crate::models::Submission;

const ACCENT: &str = "#8B5CF6";

pub fn confirmation_subject(brand: &str) -> String {
    format!("Thank You for Contacting {brand}")
}

pub fn notification_subject(submission: &Submission) -> String {
    format!("New Contact Form Submission from {}", submission.name)
}

/// Confirmation sent to the person who filled in the form.
pub fn confirmation_html(submission: &Submission, brand: &str, contact_email: &str) -> String {
    let name = escape(&submission.name);
    let email = escape(&submission.email);
    let brand = escape(brand);
    let contact_email = escape(contact_email);

    let booking = submission
        .booking
        .as_ref()
        .map(|b| {
            format!(
                r#"<div class="box"><strong>📅 Your Consultation Booking:</strong><br>{}</div>"#,
                multiline(&b.to_string())
            )
        })
        .unwrap_or_default();

    page(
        600,
        &format!(
            r#"<div class="header">
      <div class="logo">{brand_upper}</div>
      <h1>Thank You, {name}!</h1>
      <p class="muted">We've received your message and will get back to you within 24 hours.</p>
    </div>
    <p>Hello {name},</p>
    <p>Thank you for reaching out to {brand}. We're excited about the possibility of working together to bring your vision to life!</p>
    {booking}
    <p>Our team is already reviewing your message and will respond to you at <span class="highlight">{email}</span> within 24 hours.</p>
    <p>In the meantime, feel free to reach out to us directly at <a href="mailto:{contact_email}">{contact_email}</a>.</p>
    <div class="footer">
      <p>Best regards,<br><strong>The {brand} Team</strong></p>
      <p class="small">This is an automated confirmation email. Please do not reply to this message.</p>
    </div>"#,
            brand_upper = brand.to_uppercase(),
        ),
    )
}

/// Alert sent to the site owner with the full submission.
pub fn notification_html(submission: &Submission) -> String {
    let name = escape(&submission.name);
    let email = escape(&submission.email);
    let phone = escape(&submission.phone);

    let message = if submission.has_message() {
        format!(
            r#"<div class="box"><strong>💬 Message:</strong><br><br>{}</div>"#,
            multiline(&submission.message)
        )
    } else {
        String::new()
    };

    let booking = submission
        .booking
        .as_ref()
        .map(|b| {
            format!(
                r#"<div class="box"><strong class="highlight">📅 BOOKING REQUEST</strong><div>Date: {}<br>Time: {}</div></div>"#,
                escape(&b.date),
                escape(&b.time_slot)
            )
        })
        .unwrap_or_default();

    page(
        700,
        &format!(
            r#"<div class="header banner">
      <h1>🚀 New Contact Form Submission</h1>
      <p>You have a new inquiry from your website</p>
    </div>
    <div class="box">
      <p><span class="label">👤 Name:</span> {name}</p>
      <p><span class="label">📧 Email:</span> <a href="mailto:{email}">{email}</a></p>
      <p><span class="label">📱 Phone:</span> {phone}</p>
    </div>
    {message}
    {booking}
    <div class="footer">
      <p><strong>Action Required:</strong> Please respond to {name} at <a href="mailto:{email}">{email}</a></p>
      <p class="small">This is an automated notification from your website contact form.</p>
    </div>"#
        ),
    )
}

fn page(max_width: u32, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>
    body {{ font-family: 'Inter', -apple-system, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: {max_width}px; margin: 0 auto; padding: 20px; background-color: #f5f5f5; }}
    .container {{ background: #ffffff; border-radius: 12px; padding: 40px; }}
    .header {{ text-align: center; margin-bottom: 30px; }}
    .banner {{ background: {ACCENT}; color: white; padding: 30px; border-radius: 8px; }}
    .logo {{ font-size: 24px; font-weight: 900; color: {ACCENT}; }}
    .box {{ background: #f8f9fa; border-left: 4px solid {ACCENT}; padding: 20px; margin: 20px 0; border-radius: 4px; }}
    .label {{ font-weight: 600; color: {ACCENT}; display: inline-block; min-width: 120px; }}
    .highlight {{ color: {ACCENT}; font-weight: 600; }}
    .muted {{ color: #666; }}
    .footer {{ margin-top: 40px; padding-top: 20px; border-top: 1px solid #e5e7eb; text-align: center; color: #666; font-size: 14px; }}
    .small {{ font-size: 12px; color: #999; }}
  </style>
</head>
<body>
  <div class="container">
    {content}
  </div>
</body>
</html>
"#
    )
}

fn multiline(text: &str) -> String {
    escape(text).replace('\n', "<br>")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
