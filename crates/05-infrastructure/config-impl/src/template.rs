//! 配置文件参数化
//!
//! 配置文件中的 `{{ key }}` 占位符在解析前用参数值替换，缺失的键替换为空字符串。

use infrastructure_common::{ConfigError, ConfigParams, ConfigResult};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}"));

/// 用参数替换模板中的占位符
pub fn render(template: &str, parameters: &ConfigParams) -> ConfigResult<String> {
    let placeholder = PLACEHOLDER
        .as_ref()
        .map_err(|err| ConfigError::parse_error(err.clone()))?;

    let rendered = placeholder.replace_all(template, |captures: &Captures<'_>| {
        parameters
            .get_as_string(&captures[1])
            .unwrap_or_default()
    });
    Ok(rendered.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_known_and_blanks_missing() {
        let parameters = ConfigParams::parse("port=8080;db.host=localhost");

        let rendered = render(
            "port: {{port}}\nhost: {{ db.host }}\nuser: '{{user}}'",
            &parameters,
        )
        .unwrap();

        assert_eq!(rendered, "port: 8080\nhost: localhost\nuser: ''");
    }
}
