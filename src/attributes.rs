use crate::{hooks::AttributeHooks, loggable, node::DomNode};
use hashbrown::HashSet;
use tracing::{instrument, trace};

/// Makes `source`'s attributes exactly equal to `target`'s.
///
/// Every attribute of `target` is (re)set on `source`, even if unchanged, and the matching hook (if any) is called right after.
/// Only then are attributes missing from `target` removed.
#[instrument(skip(source, target, hooks), fields(tag = %source.tag_name()))]
pub(crate) fn morph_attributes<N: DomNode>(source: &N, target: &N, hooks: &AttributeHooks<N>) -> Result<(), N::Error> {
	let tag_name = source.tag_name();
	let mut seen = HashSet::new();

	for (name, value) in target.attributes() {
		trace!("Setting attribute {:?}={:?}.", name, loggable(&value));
		source.set_attribute(&name, &value)?;
		if let Some(hook) = hooks.get(&tag_name, &name) {
			trace!("Running hook for <{}> {:?}.", tag_name, name);
			hook(source, &value)?;
		}
		seen.insert(name);
	}

	for (name, value) in source.attributes() {
		if !seen.contains(&name) {
			trace!("Removing attribute {:?}={:?}.", name, loggable(&value));
			source.remove_attribute(&name)?;
		}
	}

	Ok(())
}
