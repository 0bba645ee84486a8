//! Helpers available to every template, built-in or custom.
//!
//! | Helper | Example | Output |
//! |--------|---------|--------|
//! | `snake` | `{{snake "OrderItem"}}` | `order_item` |
//! | `camel` | `{{camel "order_item"}}` | `orderItem` |
//! | `pascal` | `{{pascal "order_item"}}` | `OrderItem` |
//! | `kebab` | `{{kebab "OrderItem"}}` | `order-item` |
//! | `plural` | `{{plural "Category"}}` | `Categories` |
//! | `singular` | `{{singular "Categories"}}` | `Category` |
//! | `go_type` | `{{go_type "timestamp"}}` | `time.Time` |
//! | `zero_value` | `{{zero_value "bool"}}` | `false` |

use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason,
    handlebars_helper,
};

use goclean_core::domain::{TypeDef, naming, types};

handlebars_helper!(snake: |s: str| naming::to_snake(s));
handlebars_helper!(camel: |s: str| naming::to_camel(s));
handlebars_helper!(pascal: |s: str| naming::to_pascal(s));
handlebars_helper!(kebab: |s: str| naming::to_kebab(s));
handlebars_helper!(plural: |s: str| naming::to_plural(s));
handlebars_helper!(singular: |s: str| naming::to_singular(s));

pub(crate) fn register(registry: &mut Handlebars<'static>) {
    registry.register_helper("snake", Box::new(snake));
    registry.register_helper("camel", Box::new(camel));
    registry.register_helper("pascal", Box::new(pascal));
    registry.register_helper("kebab", Box::new(kebab));
    registry.register_helper("plural", Box::new(plural));
    registry.register_helper("singular", Box::new(singular));
    registry.register_helper("go_type", Box::new(go_type));
    registry.register_helper("zero_value", Box::new(zero_value));
}

fn go_type(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_registry_attr(h, "go_type", |def| def.go_type, out)
}

fn zero_value(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_registry_attr(h, "zero_value", |def| def.zero_value, out)
}

/// Unknown tokens are render errors, like undefined variables in strict mode.
fn write_registry_attr(
    h: &Helper,
    helper: &str,
    attr: fn(&TypeDef) -> &'static str,
    out: &mut dyn Output,
) -> HelperResult {
    let token = h
        .param(0)
        .and_then(|p| p.value().as_str())
        .ok_or_else(|| {
            RenderErrorReason::Other(format!("{helper} expects a type name argument"))
        })?;
    let def = types::lookup(token).ok_or_else(|| {
        RenderErrorReason::Other(format!(
            "{helper}: unknown type '{token}' (expected one of: {})",
            types::type_names().join(", ")
        ))
    })?;
    out.write(attr(def))?;
    Ok(())
}
