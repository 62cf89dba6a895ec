//! `pzo order`: one-shot fill + submit.

use std::io::Write;

use anyhow::{bail, Result};
use pzo_config::FormConfig;
use pzo_form::view::{Banner, FormView};
use pzo_form::{FieldName, OrderFormController, OrderGateway};
use pzo_http::HttpOrderGateway;

use super::check_topping_offered;
use crate::render::render_text;

pub struct OrderArgs {
    pub full_name: String,
    pub size: String,
    pub toppings: Vec<String>,
}

pub async fn run_order(cfg: &FormConfig, args: OrderArgs) -> Result<()> {
    let gateway = HttpOrderGateway::from_endpoint(&cfg.endpoint);
    let mut out = std::io::stdout();
    run_order_with(cfg, args, &gateway, &mut out).await
}

/// Apply the flags as input events, print the form, then submit.
///
/// A disabled submit never reaches the gateway. A failure outcome is
/// printed and then returned as an error so the process exits non-zero.
pub async fn run_order_with<G, W>(
    cfg: &FormConfig,
    args: OrderArgs,
    gateway: &G,
    out: &mut W,
) -> Result<()>
where
    G: OrderGateway + ?Sized,
    W: Write,
{
    for id in &args.toppings {
        check_topping_offered(cfg, id)?;
    }

    let mut form = OrderFormController::new();
    form.set_field(FieldName::FullName, &args.full_name);
    form.set_field(FieldName::Size, &args.size);
    for id in &args.toppings {
        form.toggle_topping(id, true);
    }

    write!(out, "{}", render_text(&FormView::build(&form, &cfg.toppings)))?;
    out.flush()?;

    let outcome = form.submit(gateway).await?;

    let banner = Banner::from(&outcome);
    writeln!(out, "[{}] {}", banner.class(), banner.message)?;
    out.flush()?;

    if !outcome.is_success() {
        bail!("order rejected: {}", outcome.message);
    }
    Ok(())
}
