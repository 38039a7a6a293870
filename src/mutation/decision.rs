/// Outcome of comparing a workload's priority class against the target.
#[derive(Debug, PartialEq)]
pub(crate) struct Decision {
    pub(crate) needs_patch: bool,
    pub(crate) warnings: Vec<String>,
}

/// Decides whether the workload needs to be patched and builds the warning
/// messages surfaced to the client. The wording distinguishes an unset
/// priority class from one that is set to something else, and the update
/// warning always comes last.
pub(crate) fn decide(
    kind: &str,
    workload_name: &str,
    current_priority_class: &str,
    target_priority_class: &str,
) -> Decision {
    if current_priority_class == target_priority_class {
        return Decision {
            needs_patch: false,
            warnings: Vec::new(),
        };
    }

    let state_warning = if current_priority_class.is_empty() {
        format!("{kind} {workload_name} does not have a PriorityClassName set.")
    } else {
        format!(
            "{kind} {workload_name} has PriorityClassName already set to: {current_priority_class}"
        )
    };
    let update_warning = format!(
        "{kind} {workload_name} was updated with PriorityClassName {target_priority_class}."
    );

    Decision {
        needs_patch: true,
        warnings: vec![state_warning, update_warning],
    }
}
