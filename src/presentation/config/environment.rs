use std::fmt;
use std::str::FromStr;

/// Selects which `appsettings.{name}.toml` overlay is read. Parsed from
/// `APP_ENVIRONMENT`; unset means [`Environment::Local`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Local,
    Test,
    Prod,
}

impl Environment {
    const ALL: [Environment; 3] = [Environment::Local, Environment::Test, Environment::Prod];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Test => "test",
            Environment::Prod => "prod",
        }
    }

    /// Base name handed to `config::File::with_name`.
    pub fn settings_file(&self) -> String {
        format!("appsettings.{}", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let name = raw.trim();
        if name.eq_ignore_ascii_case("production") {
            return Ok(Environment::Prod);
        }
        Environment::ALL
            .into_iter()
            .find(|env| name.eq_ignore_ascii_case(env.as_str()))
            .ok_or_else(|| {
                format!("unknown APP_ENVIRONMENT {name:?}; use local, test or prod")
            })
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
