// src/packages/nevra.rs

//! NEVRA (name-epoch:version-release.arch) resolution
//!
//! A package subject such as `foo-1:2.0-3.fc40.x86_64` can be read in
//! several ways depending on which components it is assumed to carry. Each
//! reading is a [`NevraForm`]; a [`NevraResolver`] returns every requested
//! form that matches the subject.
//!
//! Splitting happens from the right: the architecture follows the last `.`,
//! the release and version follow the last two `-`, and whatever remains is
//! the name. Version and release never contain `-` or `:`, the name may
//! contain `-` and `.`, and an epoch is a run of digits before a `:` at the
//! start of the version.

use std::fmt;

/// Characters that never appear in any NEVRA component
const FORBIDDEN: &[char] = &[':', '(', '/', '=', '<', '>', ' '];

/// A way of interpreting a package subject string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NevraForm {
    /// `name-[epoch:]version-release.arch`
    Nevra,
    /// `name-[epoch:]version-release`
    Nevr,
    /// `name-[epoch:]version`
    Nev,
    /// `name.arch`
    Na,
    /// `name`
    Name,
}

impl NevraForm {
    /// Every form, most specific first
    pub const ALL: [NevraForm; 5] = [Self::Nevra, Self::Nevr, Self::Nev, Self::Na, Self::Name];

    /// Interpret `subject` in this form
    pub fn parse(&self, subject: &str) -> Option<Nevra> {
        match self {
            Self::Nevra => {
                let (rest, arch) = subject.rsplit_once('.')?;
                if !is_component(arch, &['.', '-']) {
                    return None;
                }
                let mut nevra = Self::Nevr.parse(rest)?;
                nevra.arch = Some(arch.to_string());
                Some(nevra)
            }
            Self::Nevr => {
                let (rest, release) = subject.rsplit_once('-')?;
                if !is_component(release, &['-']) {
                    return None;
                }
                let mut nevra = Self::Nev.parse(rest)?;
                nevra.release = Some(release.to_string());
                Some(nevra)
            }
            Self::Nev => {
                let (name, epoch_version) = subject.rsplit_once('-')?;
                if !is_component(name, &[]) {
                    return None;
                }
                let (epoch, version) = parse_epoch_version(epoch_version)?;
                Some(Nevra {
                    name: name.to_string(),
                    epoch,
                    version: Some(version.to_string()),
                    release: None,
                    arch: None,
                })
            }
            Self::Na => {
                let (name, arch) = subject.rsplit_once('.')?;
                if !is_component(name, &[]) || !is_component(arch, &['.']) {
                    return None;
                }
                Some(Nevra {
                    name: name.to_string(),
                    arch: Some(arch.to_string()),
                    ..Nevra::default()
                })
            }
            Self::Name => is_component(subject, &[]).then(|| Nevra {
                name: subject.to_string(),
                ..Nevra::default()
            }),
        }
    }
}

impl fmt::Display for NevraForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nevra => "nevra",
            Self::Nevr => "nevr",
            Self::Nev => "nev",
            Self::Na => "na",
            Self::Name => "name",
        };
        write!(f, "{}", name)
    }
}

/// One interpretation of a package subject
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Nevra {
    pub name: String,
    pub epoch: Option<u64>,
    pub version: Option<String>,
    pub release: Option<String>,
    pub arch: Option<String>,
}

impl fmt::Display for Nevra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(ref version) = self.version {
            write!(f, "-")?;
            if let Some(epoch) = self.epoch {
                write!(f, "{}:", epoch)?;
            }
            write!(f, "{}", version)?;
        }
        if let Some(ref release) = self.release {
            write!(f, "-{}", release)?;
        }
        if let Some(ref arch) = self.arch {
            write!(f, ".{}", arch)?;
        }
        Ok(())
    }
}

/// Resolves a bare package subject into candidate NEVRAs
pub trait NevraResolver {
    /// Every interpretation of `subject` in the requested `forms`, in the
    /// order the forms were given. May be empty.
    fn possibilities(&self, subject: &str, forms: &[NevraForm]) -> Vec<Nevra>;
}

/// Default resolver that tries each requested form in turn
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectResolver;

impl NevraResolver for SubjectResolver {
    fn possibilities(&self, subject: &str, forms: &[NevraForm]) -> Vec<Nevra> {
        forms.iter().filter_map(|form| form.parse(subject)).collect()
    }
}

fn is_component(s: &str, also_forbidden: &[char]) -> bool {
    !s.is_empty() && !s.contains(FORBIDDEN) && !s.contains(also_forbidden)
}

/// Split `[epoch:]version`, requiring a numeric epoch when one is present
fn parse_epoch_version(s: &str) -> Option<(Option<u64>, &str)> {
    let (epoch, version) = match s.split_once(':') {
        Some((epoch, version)) => {
            if epoch.is_empty() || !epoch.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            (Some(epoch.parse::<u64>().ok()?), version)
        }
        None => (None, s),
    };

    is_component(version, &['-']).then_some((epoch, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nevra_form_simple() {
        let nevra = NevraForm::Nevra.parse("foo-1.0-1.src").unwrap();
        assert_eq!(nevra.name, "foo");
        assert_eq!(nevra.epoch, None);
        assert_eq!(nevra.version.as_deref(), Some("1.0"));
        assert_eq!(nevra.release.as_deref(), Some("1"));
        assert_eq!(nevra.arch.as_deref(), Some("src"));
    }

    #[test]
    fn test_nevra_form_hyphenated_name() {
        let nevra = NevraForm::Nevra.parse("python3-foo-bar-2.1.0-3.fc40.src").unwrap();
        assert_eq!(nevra.name, "python3-foo-bar");
        assert_eq!(nevra.version.as_deref(), Some("2.1.0"));
        assert_eq!(nevra.release.as_deref(), Some("3.fc40"));
    }

    #[test]
    fn test_nevra_form_with_epoch() {
        let nevra = NevraForm::Nevra.parse("bind-32:9.18.24-1.fc40.src").unwrap();
        assert_eq!(nevra.name, "bind");
        assert_eq!(nevra.epoch, Some(32));
        assert_eq!(nevra.version.as_deref(), Some("9.18.24"));
        assert_eq!(nevra.to_string(), "bind-32:9.18.24-1.fc40.src");
    }

    #[test]
    fn test_nevra_form_rejects() {
        assert!(NevraForm::Nevra.parse("").is_none());
        assert!(NevraForm::Nevra.parse("foo").is_none());
        assert!(NevraForm::Nevra.parse("foo-1.0-1").is_none());
        assert!(NevraForm::Nevra.parse("foo-x:1.0-1.src").is_none());
        assert!(NevraForm::Nevra.parse("-1.0-1.src").is_none());
        assert!(NevraForm::Nevra.parse("foo-1.0-.src").is_none());
    }

    #[test]
    fn test_other_forms() {
        let nevr = NevraForm::Nevr.parse("foo-1.0-1").unwrap();
        assert_eq!(nevr.to_string(), "foo-1.0-1");

        let nev = NevraForm::Nev.parse("foo-2:1.0").unwrap();
        assert_eq!(nev.epoch, Some(2));
        assert_eq!(nev.release, None);

        let na = NevraForm::Na.parse("foo-devel.x86_64").unwrap();
        assert_eq!(na.name, "foo-devel");
        assert_eq!(na.arch.as_deref(), Some("x86_64"));

        let name = NevraForm::Name.parse("foo").unwrap();
        assert_eq!(name.to_string(), "foo");
        assert!(NevraForm::Name.parse("foo bar").is_none());
    }

    #[test]
    fn test_resolver_returns_every_matching_form() {
        let resolver = SubjectResolver;
        let all = resolver.possibilities("foo-1.0-1.src", &NevraForm::ALL);
        let names: Vec<&str> = all.iter().map(|n| n.name.as_str()).collect();
        // nevra, nevr (release "1.src"), nev (name "foo-1.0"), na, name
        assert_eq!(names, vec!["foo", "foo", "foo-1.0", "foo-1.0-1", "foo-1.0-1.src"]);

        let strict = resolver.possibilities("foo-1.0-1.src", &[NevraForm::Nevra]);
        assert_eq!(strict.len(), 1);
        assert!(resolver.possibilities("", &[NevraForm::Nevra]).is_empty());
    }
}
