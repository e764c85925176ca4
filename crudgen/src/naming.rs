//! Naming conventions for generated classes, endpoints and tables
//!
//! All functions here are pure string transforms. Given a module id such as
//! `cmsadmin` and a model name such as `NavItem` they derive:
//!
//! | What              | Example                    |
//! |-------------------|----------------------------|
//! | class name        | `NavItem`                  |
//! | API endpoint      | `api-cms-navitem`          |
//! | table name        | `cms_navitem`              |
//! | controller route  | `cmsadmin/nav-item/index`  |

use inflector::Inflector;

/// Suffix stripped from module ids when deriving endpoints and table names
pub const ADMIN_SUFFIX: &str = "admin";

/// Naming helpers used by the flow and the templates
pub struct NamingHelpers;

impl NamingHelpers {
    /// Convert snake, dash or space separated text to `PascalCase`
    ///
    /// Every run of non-alphanumeric characters separates words; the first
    /// letter of each word is upper-cased and the rest is kept as written.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen::naming::NamingHelpers;
    /// assert_eq!(NamingHelpers::camelize("nav_item"), "NavItem");
    /// assert_eq!(NamingHelpers::camelize("navItem"), "NavItem");
    /// assert_eq!(NamingHelpers::camelize("NavItem"), "NavItem");
    /// ```
    #[must_use]
    pub fn camelize(input: &str) -> String {
        input
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    std::iter::once(upper_initial(first)).chain(chars).collect::<String>()
                })
            })
            .collect()
    }

    /// Camelize `base` and append `suffix` exactly once
    ///
    /// When the camelized base already ends with the suffix (compared
    /// case-insensitively) the existing ending is replaced by `suffix`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen::naming::NamingHelpers;
    /// assert_eq!(NamingHelpers::derive_class_name("Foo", "Controller"), "FooController");
    /// assert_eq!(NamingHelpers::derive_class_name("FooController", "Controller"), "FooController");
    /// assert_eq!(NamingHelpers::derive_class_name("foo_controller", "Controller"), "FooController");
    /// ```
    #[must_use]
    pub fn derive_class_name(base: &str, suffix: &str) -> String {
        let name = Self::camelize(base);
        if suffix.is_empty() {
            return name;
        }

        let stem = name.len().checked_sub(suffix.len()).and_then(|cut| {
            (name.is_char_boundary(cut) && name[cut..].to_lowercase() == suffix.to_lowercase())
                .then(|| &name[..cut])
        });

        format!("{}{suffix}", stem.unwrap_or(&name))
    }

    /// Module id without a trailing `admin`
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen::naming::NamingHelpers;
    /// assert_eq!(NamingHelpers::module_without_admin_suffix("cmsadmin"), "cms");
    /// assert_eq!(NamingHelpers::module_without_admin_suffix("gallery"), "gallery");
    /// ```
    #[must_use]
    pub fn module_without_admin_suffix(module: &str) -> &str {
        module.strip_suffix(ADMIN_SUFFIX).unwrap_or(module)
    }

    /// Model name in lower case
    #[must_use]
    pub fn model_name_lower(model: &str) -> String {
        model.to_lowercase()
    }

    /// Suggested API endpoint: `api-<module>-<model>`
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen::naming::NamingHelpers;
    /// assert_eq!(NamingHelpers::suggest_api_endpoint("cmsadmin", "NavItem"), "api-cms-navitem");
    /// ```
    #[must_use]
    pub fn suggest_api_endpoint(module: &str, model: &str) -> String {
        format!(
            "api-{}-{}",
            Self::module_without_admin_suffix(module),
            Self::model_name_lower(model)
        )
    }

    /// Suggested database table: `<module>_<model>` in lower case
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen::naming::NamingHelpers;
    /// assert_eq!(NamingHelpers::suggest_table_name("cmsadmin", "NavItem"), "cms_navitem");
    /// assert_eq!(NamingHelpers::suggest_table_name("cmsadmin", "nav item"), "cms_nav_item");
    /// ```
    #[must_use]
    pub fn suggest_table_name(module: &str, model: &str) -> String {
        format!(
            "{}_{}",
            Self::module_without_admin_suffix(module),
            Self::underscore(model)
        )
        .to_lowercase()
    }

    /// Replace every run of separator characters with a single `_`
    #[must_use]
    pub fn underscore(input: &str) -> String {
        input
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Route of the generated admin controller: `<module>/<model-id>/index`
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen::naming::NamingHelpers;
    /// assert_eq!(NamingHelpers::controller_route("cmsadmin", "NavItem"), "cmsadmin/nav-item/index");
    /// ```
    #[must_use]
    pub fn controller_route(module: &str, model: &str) -> String {
        format!(
            "{}/{}/index",
            module.to_lowercase(),
            Self::camelize(model).to_kebab_case()
        )
    }

    /// Human-readable label for a column; a trailing `id` word becomes `ID`
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen::naming::NamingHelpers;
    /// assert_eq!(NamingHelpers::humanize("is_active"), "Is Active");
    /// assert_eq!(NamingHelpers::humanize("user_id"), "User ID");
    /// assert_eq!(NamingHelpers::humanize("title"), "Title");
    /// ```
    #[must_use]
    pub fn humanize(column: &str) -> String {
        let label = column.to_title_case();
        match label.strip_suffix("Id") {
            Some(head) if head.is_empty() || head.ends_with(' ') => format!("{head}ID"),
            _ => label,
        }
    }

    /// Join namespace segments with `\`
    #[must_use]
    pub fn sub_namespace(namespace: &str, child: &str) -> String {
        format!("{}\\{child}", namespace.trim_end_matches('\\'))
    }
}

/// Upper-case a word's first letter, keeping it when the upper-case form is
/// not a single alphanumeric char (e.g. `ΐ` expands to a letter plus marks)
fn upper_initial(first: char) -> char {
    let mut upper = first.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) if single.is_alphanumeric() => single,
        _ => first,
    }
}
