use epg_payment_engine::api::PaymentInit;

use crate::config::GatewayConfig;

/// Renders the self-submitting redirect document that carries the signed payment request to the gateway.
///
/// Every value interpolated here is either produced by the engine (amounts, signature) or validated at
/// initiation (transaction uuid and product code are restricted to URL- and HTML-safe characters), so no
/// escaping is needed.
pub fn render_redirect_form(init: &PaymentInit, gateway: &GatewayConfig) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>eSewa Payment</title></head>
<body style="text-align: center; padding: 50px;">
  <h2>Redirecting to eSewa...</h2>
  <form action="{form_url}" method="POST">
    <input type="hidden" name="amount" value="{amount}">
    <input type="hidden" name="tax_amount" value="{tax_amount}">
    <input type="hidden" name="total_amount" value="{total_amount}">
    <input type="hidden" name="transaction_uuid" value="{transaction_uuid}">
    <input type="hidden" name="product_code" value="{product_code}">
    <input type="hidden" name="product_service_charge" value="{product_service_charge}">
    <input type="hidden" name="product_delivery_charge" value="{product_delivery_charge}">
    <input type="hidden" name="success_url" value="{success_url}">
    <input type="hidden" name="failure_url" value="{failure_url}">
    <input type="hidden" name="signed_field_names" value="{signed_field_names}">
    <input type="hidden" name="signature" value="{signature}">
    <button type="submit" style="padding: 10px 20px; font-size: 16px;">Proceed to eSewa Payment</button>
  </form>
</body>
</html>
"#,
        form_url = gateway.form_url,
        amount = init.amount,
        tax_amount = init.tax_amount,
        total_amount = init.total_amount,
        transaction_uuid = init.transaction_uuid,
        product_code = init.product_code,
        product_service_charge = init.product_service_charge,
        product_delivery_charge = init.product_delivery_charge,
        success_url = gateway.success_url(),
        failure_url = gateway.failure_url(),
        signed_field_names = init.signed_field_names,
        signature = init.signature,
    )
}
