use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCodes {
    #[msg(REGISTRY_ONLY_OWNER)]
    RegistryOnlyOwner,

    #[msg(REGISTRY_INVALID_ADDRESS)]
    RegistryInvalidAddress,

    #[msg(REGISTRY_INVALID_ORDER)]
    RegistryInvalidOrder,

    #[msg(REGISTRY_INVALID_POOL_ID)]
    RegistryInvalidPoolId,
}
