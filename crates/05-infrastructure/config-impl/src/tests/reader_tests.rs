//! 配置文件读取测试

use super::init_test_logger;
use crate::reader::{ConfigFormat, ContainerConfigReader};
use infrastructure_common::{ConfigError, ConfigParams, Descriptor};
use std::io::Write;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_read_yaml_with_parameters() {
    init_test_logger();
    let file = write_temp(
        ".yml",
        r#"
- descriptor: "lorn-adsp:context-info:default:default:1.0"
  name: "{{ name }}"
- descriptor: "lorn-adsp-dummies:controller:default:default:1.0"
  message: "{{message}}"
"#,
    );
    let parameters = ConfigParams::parse("name=dummy;message=hello");

    let config = ContainerConfigReader::read_from_file(file.path(), Some(&parameters)).unwrap();
    let components: Vec<_> = config.iter().collect();

    assert_eq!(components.len(), 2);
    assert_eq!(
        components[0].config().get_as_string("name").as_deref(),
        Some("dummy")
    );
    assert_eq!(
        components[1].config().get_as_string("message").as_deref(),
        Some("hello")
    );
}

#[test]
fn test_read_json_file() {
    init_test_logger();
    let file = write_temp(
        ".json",
        r#"[{ "descriptor": "grp:ctrl:default:default:1.0", "message": "hi" }]"#,
    );

    let config = ContainerConfigReader::read_from_file(file.path(), None).unwrap();

    assert_eq!(
        config.iter().next().and_then(|c| c.descriptor()).cloned(),
        Some(Descriptor::new("grp", "ctrl", "default", "default", "1.0"))
    );
}

#[test]
fn test_read_toml_components_table_array() {
    init_test_logger();
    let file = write_temp(
        ".toml",
        r#"
[[components]]
descriptor = "grp:logger:console:default:1.0"
level = "debug"

[[components]]
descriptor = "grp:ctrl:default:default:1.0"
message = "hi"
"#,
    );

    let config = ContainerConfigReader::read_from_file(file.path(), None).unwrap();

    assert_eq!(config.len(), 2);
    assert_eq!(
        config.iter().nth(1).unwrap().config().get_as_string("message").as_deref(),
        Some("hi")
    );
}

#[test]
fn test_missing_file_is_reported() {
    let err = ContainerConfigReader::read_from_file("/nonexistent/config.yml", None).unwrap_err();

    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn test_unknown_extension_falls_back_to_json() {
    assert_eq!(ConfigFormat::from_path(Path::new("app.conf")), ConfigFormat::Json);
    assert_eq!(ConfigFormat::from_path(Path::new("app.YAML")), ConfigFormat::Yaml);
}

#[test]
fn test_invalid_yaml_is_a_parse_error() {
    let file = write_temp(".yaml", "- descriptor: [unclosed");

    let err = ContainerConfigReader::read_from_file(file.path(), None).unwrap_err();

    assert!(matches!(err, ConfigError::ParseError { .. }));
}
