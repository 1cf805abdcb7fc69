// Inputid Subsystem Rules
// Path-pattern table that assigns a subsystem and a handler to each device node

use regex::Regex;

/// Subsystem reported for paths no rule claims
pub const UNKNOWN_SUBSYSTEM: &str = "unknown";

/// Default root of the device node tree
pub const DEV_PATH_ROOT: &str = "/dev";

/// How a matched device gets its properties and parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// Probe evdev capabilities and classify
    Evdev,
    Keyboard,
    Mouse,
    Joystick,
    Touchpad,
    Touchscreen,
    /// Console mouse; fixed parent identity
    Sysmouse,
    /// Keyboard multiplexor; fixed parent identity
    Kbdmux,
}

/// One entry of the rule table
#[derive(Debug, Clone)]
pub struct SubsystemRule {
    pub subsystem: &'static str,
    /// Shell-style glob matched against the whole path
    pub pattern: String,
    /// Ignore the device when evdev already exposes it
    pub skip_if_evdev: bool,
    pub handler: HandlerKind,
    matcher: Option<Regex>,
}

impl SubsystemRule {
    pub fn new(
        subsystem: &'static str,
        pattern: impl Into<String>,
        skip_if_evdev: bool,
        handler: HandlerKind,
    ) -> Self {
        let pattern = pattern.into();
        let matcher = match Regex::new(&glob_to_regex(&pattern)) {
            Ok(re) => Some(re),
            Err(e) => {
                log::warn!("invalid device pattern {:?}: {}", pattern, e);
                None
            }
        };
        Self {
            subsystem,
            pattern,
            skip_if_evdev,
            handler,
            matcher,
        }
    }

    /// Check the path against the pattern. A pattern that failed to compile
    /// matches nothing.
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.as_ref().is_some_and(|re| re.is_match(path))
    }
}

/// Translate a shell glob (`*`, `?`, `[...]`, `[!...]`) into an anchored regex.
///
/// `*` also matches `/`, like fnmatch(3) without `FNM_PATHNAME`.
fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2 + 2);
    out.push('^');

    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => {
                let mut class = String::new();
                let mut raw = String::from("[");
                let mut closed = false;
                if chars.peek() == Some(&'!') {
                    chars.next();
                    raw.push('!');
                    class.push('^');
                }
                // a leading ']' is a literal member
                if chars.peek() == Some(&']') {
                    chars.next();
                    raw.push(']');
                    class.push_str("\\]");
                }
                for c in chars.by_ref() {
                    if c != ']' {
                        raw.push(c);
                    }
                    match c {
                        ']' => {
                            closed = true;
                            break;
                        }
                        '\\' | '[' | '^' | '&' | '~' => {
                            class.push('\\');
                            class.push(c);
                        }
                        _ => class.push(c),
                    }
                }
                if closed {
                    out.push('[');
                    out.push_str(&class);
                    out.push(']');
                } else {
                    // unterminated bracket: match the text literally
                    out.push_str(&regex::escape(&raw));
                }
            }
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }

    out.push('$');
    out
}

/// Ordered rule table; the first matching rule wins.
///
/// Whether evdev is active is resolved once by the caller and fixed for the
/// lifetime of the table.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<SubsystemRule>,
    evdev_enabled: bool,
}

impl RuleTable {
    /// Standard rules rooted at `/dev`
    pub fn new(evdev_enabled: bool) -> Self {
        Self::with_root(DEV_PATH_ROOT, evdev_enabled)
    }

    /// Standard rules rooted at an arbitrary device directory
    pub fn with_root(root: &str, evdev_enabled: bool) -> Self {
        use HandlerKind::*;

        let root = root.trim_end_matches('/');
        let rule = |name: &str, skip: bool, handler: HandlerKind| {
            SubsystemRule::new("input", format!("{}/{}", root, name), skip, handler)
        };

        let rules = vec![
            rule("input/event[0-9]*", false, Evdev),
            rule("ukbd[0-9]*", true, Keyboard),
            rule("atkbd[0-9]*", true, Keyboard),
            rule("kbdmux[0-9]*", true, Kbdmux),
            rule("ums[0-9]*", true, Mouse),
            rule("psm[0-9]*", true, Mouse),
            rule("joy[0-9]*", false, Joystick),
            rule("atp[0-9]*", false, Touchpad),
            rule("wsp[0-9]*", false, Touchpad),
            rule("uep[0-9]*", false, Touchscreen),
            rule("sysmouse", true, Sysmouse),
            rule("vboxguest", false, Mouse),
        ];

        Self::from_rules(rules, evdev_enabled)
    }

    /// Build a table from custom rules
    pub fn from_rules(rules: Vec<SubsystemRule>, evdev_enabled: bool) -> Self {
        Self {
            rules,
            evdev_enabled,
        }
    }

    pub fn rules(&self) -> &[SubsystemRule] {
        &self.rules
    }

    pub fn evdev_enabled(&self) -> bool {
        self.evdev_enabled
    }

    /// First rule matching `path`, unless it defers to evdev
    pub fn rule_for(&self, path: &str) -> Option<&SubsystemRule> {
        let rule = self.rules.iter().find(|rule| rule.matches(path))?;
        if rule.skip_if_evdev && self.evdev_enabled {
            log::trace!("({}) EVDEV enabled -> skipping device", path);
            return None;
        }
        Some(rule)
    }

    /// Subsystem name for a path, or [`UNKNOWN_SUBSYSTEM`]
    pub fn subsystem_for(&self, path: &str) -> &'static str {
        self.rule_for(path)
            .map_or(UNKNOWN_SUBSYSTEM, |rule| rule.subsystem)
    }

    /// Handler for a path, if any rule claims it
    pub fn handler_for(&self, path: &str) -> Option<HandlerKind> {
        self.rule_for(path).map(|rule| rule.handler)
    }
}

/// Last path component, ignoring trailing separators
pub fn sysname_for(syspath: &str) -> &str {
    let trimmed = syspath.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Device paths double as sysfs paths on this platform
pub fn devpath_for(syspath: &str) -> &str {
    syspath
}

pub fn syspath_for(devpath: &str) -> &str {
    devpath
}
