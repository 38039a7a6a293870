use crate::mutation::MutationSettings;

pub(crate) struct ApiServerState {
    pub(crate) settings: MutationSettings,
}
