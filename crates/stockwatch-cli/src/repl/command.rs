use crate::View;

/// One line typed at the session prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionCommand {
    Load,
    Brands,
    Watch { brand: String, email: Option<String> },
    Unwatch(String),
    Watches,
    Select(Vec<String>),
    Show(View),
    Notify,
    Clear,
    Help,
    Quit,
}

pub(crate) const HELP: &str = "\
commands:
  load | refresh               fetch the stock sheet
  brands                       list brands in the loaded sheet
  watch <brand> [email]        watch a brand, optionally with an alert address
  unwatch <brand>              stop watching a brand
  watches                      list watched brands
  select <brand>[, <brand>..]  choose up to 10 brands to display
  show [overview|out-of-stock|products|all|raw]
  notify                       email alerts for watched brands
  clear                        forget watches, selection and data
  help                         this text
  quit | exit
";

/// Parses one prompt line. Blank lines and `#` comments yield `Ok(None)`.
///
/// # Errors
///
/// Returns a message describing the problem for unknown commands or
/// missing arguments.
pub(crate) fn parse_command(line: &str) -> Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_lowercase().as_str() {
        "load" | "refresh" => SessionCommand::Load,
        "brands" => SessionCommand::Brands,
        "watch" => parse_watch(rest)?,
        "unwatch" => {
            if rest.is_empty() {
                return Err("usage: unwatch <brand>".to_string());
            }
            SessionCommand::Unwatch(rest.to_string())
        }
        "watches" => SessionCommand::Watches,
        "select" => {
            let brands: Vec<String> = rest
                .split(',')
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(str::to_string)
                .collect();
            if brands.is_empty() {
                return Err("usage: select <brand>[, <brand>...]".to_string());
            }
            SessionCommand::Select(brands)
        }
        "show" => SessionCommand::Show(parse_view(rest)?),
        "notify" => SessionCommand::Notify,
        "clear" => SessionCommand::Clear,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("unknown command '{other}'; type 'help'")),
    };
    Ok(Some(command))
}

/// `watch <brand words...> [email]`: a trailing word containing `@` is the
/// address, everything before it is the brand.
fn parse_watch(rest: &str) -> Result<SessionCommand, String> {
    let usage = || "usage: watch <brand> [email]".to_string();
    if rest.is_empty() {
        return Err(usage());
    }

    let (brand, email) = match rest.rsplit_once(char::is_whitespace) {
        Some((brand, last)) if last.contains('@') => (brand.trim(), Some(last.to_string())),
        _ if !rest.contains(char::is_whitespace) && rest.contains('@') => return Err(usage()),
        _ => (rest, None),
    };
    Ok(SessionCommand::Watch {
        brand: brand.to_string(),
        email,
    })
}

fn parse_view(rest: &str) -> Result<View, String> {
    match rest.to_lowercase().as_str() {
        "" | "all" => Ok(View::All),
        "overview" => Ok(View::Overview),
        "out-of-stock" | "oos" => Ok(View::OutOfStock),
        "products" => Ok(View::Products),
        "raw" | "columns" => Ok(View::Raw),
        other => Err(format!(
            "unknown view '{other}'; expected overview, out-of-stock, products, all or raw"
        )),
    }
}
