use soroban_sdk::contracttype;

/// Error categories for classifying engine failures.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Invalid input parameters or a precondition on pool state
    Validation = 1,
    /// Caller is not the administrator
    Authorization = 2,
    /// The requested transition conflicts with current state
    StateConflict = 3,
    /// A fixed-point result does not fit the storage type
    Arithmetic = 4,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    // ── Lifecycle ──
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // ── Auth ──
    Unauthorized = 10,

    // ── Validation ──
    PoolNotFound = 20,
    InvalidAmount = 21,
    InsufficientBalance = 22,
    InvalidRewardRate = 23,
    InvalidDuration = 24,
    InvalidPenalty = 25,
    PoolPaused = 27,
    PoolEnded = 28,
    LockActive = 29,

    // ── State conflicts ──
    AlreadyPaused = 40,
    NotPaused = 41,
    NothingToClaim = 42,
    NothingStaked = 43,
    Reentrant = 44,
    RewardReserveExhausted = 45,

    // ── Arithmetic ──
    ArithmeticOverflow = 50,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::PoolNotFound
            | ContractError::InvalidAmount
            | ContractError::InsufficientBalance
            | ContractError::InvalidRewardRate
            | ContractError::InvalidDuration
            | ContractError::InvalidPenalty
            | ContractError::PoolPaused
            | ContractError::PoolEnded
            | ContractError::LockActive => ErrorCategory::Validation,

            ContractError::Unauthorized => ErrorCategory::Authorization,

            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::AlreadyPaused
            | ContractError::NotPaused
            | ContractError::NothingToClaim
            | ContractError::NothingStaked
            | ContractError::Reentrant
            | ContractError::RewardReserveExhausted => ErrorCategory::StateConflict,

            ContractError::ArithmeticOverflow => ErrorCategory::Arithmetic,
        }
    }
}
