use alloc::string::String;

use bp_reflect::Reflect;
use bp_reflect::access::PropertyAccess;

use crate::{EditorError, EditorRegistry};

/// Converts `text` with the editor of the addressed slot and writes it.
///
/// The editor is looked up by the runtime type of the current value, or
/// the declared type when the slot is null, with one `Option` level
/// stripped. Blank text on a nullable slot writes null.
///
/// # Examples
///
/// ```
/// use bp_editor::{EditorRegistry, set_from_text};
/// use bp_reflect::access::{NullPolicy, PropertyAccess};
/// use bp_reflect::derive::Bean;
///
/// #[derive(Bean)]
/// struct Job {
///     retries: Option<u8>,
///     enabled: bool,
/// }
///
/// let access = PropertyAccess::new(NullPolicy::Ignore);
/// let editors = EditorRegistry::with_defaults();
/// let mut job = Job { retries: None, enabled: false };
///
/// set_from_text(&access, &editors, &mut job, "retries", "3").unwrap();
/// set_from_text(&access, &editors, &mut job, "enabled", "on").unwrap();
/// assert_eq!(job.retries, Some(3));
/// assert!(job.enabled);
///
/// set_from_text(&access, &editors, &mut job, "retries", "").unwrap();
/// assert_eq!(job.retries, None);
/// ```
pub fn set_from_text(
    access: &PropertyAccess,
    editors: &EditorRegistry,
    target: &mut dyn Reflect,
    path: &str,
    text: &str,
) -> Result<(), EditorError> {
    let property = access.property(path)?;
    let ty = property.property_type_of(target)?;

    let nullable = ty.is_nullable()
        || property
            .property_type(target.reflect_type_info())
            .is_ok_and(|declared| declared.is_nullable());
    if nullable && text.trim().is_empty() {
        return Ok(property.set(target, None)?);
    }

    let value_ty = ty.non_null();
    let editor = editors.get(value_ty).ok_or(EditorError::Unsupported {
        type_path: value_ty.type_path(),
    })?;
    let value = editor.parse(text)?;
    property.set(target, Some(value))?;
    Ok(())
}

/// Reads the addressed value and formats it with the editor of its type.
///
/// `Ok(None)` is null.
///
/// # Examples
///
/// ```
/// use bp_editor::{EditorRegistry, get_as_text};
/// use bp_reflect::access::{NullPolicy, PropertyAccess};
/// use bp_reflect::derive::Bean;
///
/// #[derive(Bean)]
/// struct Job {
///     tags: Vec<String>,
///     owner: Option<String>,
/// }
///
/// let access = PropertyAccess::new(NullPolicy::Ignore);
/// let editors = EditorRegistry::with_defaults();
/// let job = Job { tags: vec!["a".into(), "b".into()], owner: None };
///
/// assert_eq!(get_as_text(&access, &editors, &job, "tags").unwrap().as_deref(), Some("a,b"));
/// assert_eq!(get_as_text(&access, &editors, &job, "owner").unwrap(), None);
/// ```
pub fn get_as_text(
    access: &PropertyAccess,
    editors: &EditorRegistry,
    target: &dyn Reflect,
    path: &str,
) -> Result<Option<String>, EditorError> {
    let Some(value) = access.get(target, path)? else {
        return Ok(None);
    };
    let ty = value.reflect_type_info();
    let editor = editors.get(ty).ok_or(EditorError::Unsupported {
        type_path: ty.type_path(),
    })?;
    editor.format(value).map(Some)
}
