//! Minimal `console` object for evaluated scripts.
//!
//! Output is forwarded to `tracing` under the `xguard::script` target, so it
//! lands wherever the host sends the rest of its diagnostics.

use boa_engine::object::FunctionObjectBuilder;
use boa_engine::property::Attribute;
use boa_engine::{js_string, Context, JsResult, JsValue, NativeFunction, Source};

const CONSOLE_SETUP: &str = r#"
var console = (function(sink) {
    function format(args) {
        var parts = [];
        for (var i = 0; i < args.length; i++) {
            if (args[i] !== null && typeof args[i] === 'object') {
                try { parts.push(JSON.stringify(args[i])); } catch (e) { parts.push(String(args[i])); }
            } else {
                parts.push(String(args[i]));
            }
        }
        return parts.join(' ');
    }
    return {
        log: function() { sink('info', format(arguments)); },
        info: function() { sink('info', format(arguments)); },
        debug: function() { sink('debug', format(arguments)); },
        warn: function() { sink('warn', format(arguments)); },
        error: function() { sink('error', format(arguments)); },
        group: function() { sink('info', format(arguments)); },
        groupEnd: function() {}
    };
})(__xguard_console_sink);
"#;

/// Install `console` into a boa context.
pub fn register_console(context: &mut Context) -> JsResult<()> {
    let sink = FunctionObjectBuilder::new(
        context.realm(),
        NativeFunction::from_fn_ptr(console_sink),
    )
    .name(js_string!("__xguard_console_sink"))
    .length(2)
    .constructor(false)
    .build();
    context.register_global_property(
        js_string!("__xguard_console_sink"),
        sink,
        Attribute::all(),
    )?;

    context.eval(Source::from_bytes(CONSOLE_SETUP))?;
    Ok(())
}

fn console_sink(_this: &JsValue, args: &[JsValue], _ctx: &mut Context) -> JsResult<JsValue> {
    let level = js_arg_to_string(args.first());
    let message = js_arg_to_string(args.get(1));
    match level.as_str() {
        "debug" => tracing::debug!(target: "xguard::script", "{}", message),
        "warn" => tracing::warn!(target: "xguard::script", "{}", message),
        "error" => tracing::error!(target: "xguard::script", "{}", message),
        _ => tracing::info!(target: "xguard::script", "{}", message),
    }
    Ok(JsValue::undefined())
}

fn js_arg_to_string(arg: Option<&JsValue>) -> String {
    arg.and_then(|v| v.as_string())
        .map(|s| s.to_std_string_escaped())
        .unwrap_or_default()
}
