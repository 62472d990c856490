//! HTML bodies and subjects for the transactional emails.
//!
//! The payment-result notice is built inline; the welcome email comes from
//! an external HTML template personalized by placeholder substitution.
//! Copy is Spanish because that is what the payers read.

use crate::domain::foundation::Timestamp;
use crate::ports::PaymentResultNotice;

/// Fixed subject of the subscription welcome email.
pub const WELCOME_SUBJECT: &str = "¡Bienvenido a tu Suscripción! - Primer Pago Exitoso";

/// Literal replaced in the welcome template with the personalized greeting.
const WELCOME_PLACEHOLDER: &str = "¡Bienvenido!";

/// Greeting fallback when the gateway sent no payer name.
const FALLBACK_PAYER_NAME: &str = "Cliente";

/// Subject line for the payment result notice.
pub fn payment_result_subject(notice: &PaymentResultNotice) -> String {
    if notice.approved {
        format!("¡Pago Exitoso! - Orden {}", notice.order_id)
    } else {
        format!("Atención: Problema con tu pago - Orden {}", notice.order_id)
    }
}

/// Inline HTML body for the payment result notice.
pub fn payment_result_body(notice: &PaymentResultNotice, sent_at: &Timestamp) -> String {
    let payer = notice.payer_name.as_deref().unwrap_or(FALLBACK_PAYER_NAME);
    let (header_color, header_text, closing) = if notice.approved {
        (
            "#2e7d32",
            "¡Confirmación de Pago!",
            "Gracias por tu pago. Tu suscripción se ha actualizado correctamente.",
        )
    } else {
        (
            "#d32f2f",
            "Notificación de Pago",
            "Lamentablemente, el pago no pudo ser procesado con éxito. \
             Por favor, intenta nuevamente o contacta a soporte si el problema persiste.",
        )
    };

    let amount_line = match notice.amount {
        Some(amount) => format!("<p><strong>Monto:</strong> {}</p>\n", format_cop(amount)),
        None => String::new(),
    };
    let date = sent_at.as_datetime().format("%d/%m/%Y %H:%M");

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #e0e0e0; border-radius: 8px;">
    <h2 style="color: {header_color}; text-align: center;">{header_text}</h2>
    <p>Hola <strong>{payer}</strong>,</p>
    <p>Te informamos el estado de tu transacción para la orden <strong>{order}</strong>:</p>
    <div style="background-color: #f9f9f9; padding: 15px; border-radius: 5px; margin: 20px 0;">
        <p><strong>Estado:</strong> {status}</p>
        {amount_line}<p><strong>Fecha:</strong> {date}</p>
    </div>
    <p>{closing}</p>
    <hr style="border: 0; border-top: 1px solid #eee; margin: 20px 0;">
    <p style="font-size: 12px; color: #777; text-align: center;">
        Este es un correo automático, por favor no respondas a este mensaje.
    </p>
</div>"#,
        header_color = header_color,
        header_text = header_text,
        payer = payer,
        order = notice.order_id,
        status = notice.status_name,
        amount_line = amount_line,
        date = date,
        closing = closing,
    )
}

/// Substitute the welcome template's greeting placeholder with the payer name.
///
/// Only the first occurrence is replaced; the rest of the template passes
/// through untouched.
pub fn personalize_welcome(template: &str, payer_name: Option<&str>) -> String {
    let payer = payer_name.unwrap_or(FALLBACK_PAYER_NAME);
    template.replacen(
        WELCOME_PLACEHOLDER,
        &format!("¡Bienvenido, {}!", payer),
        1,
    )
}

/// Format an amount the way the payment emails show it: Colombian peso
/// grouping with `.` as the thousands separator, e.g. `$50.000 COP`.
pub fn format_cop(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let whole = cents / 100;
    let frac = (cents % 100).abs();

    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if whole < 0 { "-" } else { "" };
    if frac == 0 {
        format!("${}{} COP", sign, grouped)
    } else {
        format!("${}{},{:02} COP", sign, grouped, frac)
    }
}
