use crate::app_state::AppState;
use crate::clients::notifier::NotificationEvent;
use crate::repositories::escrow_repository::EscrowRepository;
use crate::repositories::transaction_repository::TransactionRepository;
use crate::repositories::wallet_repository::WalletRepository;
use crate::services::wallet_service::WalletService;
use diesel::prelude::*;
use diesel::Connection;
use tracing::{error, info};
use unimart_primitives::error::ApiError;
use unimart_primitives::models::config::EscrowInfo;
use unimart_primitives::models::dtos::escrow_dto::{
    ConfirmingParty, CreateEscrowRequest, DisputeResolution, EscrowDto,
};
use unimart_primitives::models::entities::enum_types::{EscrowStatus, TransactionKind, TxnState};
use unimart_primitives::models::entities::escrow::{EscrowTransaction, NewEscrowTransaction};
use unimart_primitives::models::entities::transaction::NewTransaction;
use unimart_primitives::money::naira_to_kobo;
use uuid::Uuid;
use validator::Validate;

/// State machine: pending → held → {released | refunded | disputed};
/// disputed resolves to released or refunded through arbitration. Funds
/// leave the buyer at creation, so escrowed money cannot be double-spent
/// during the hold window.
pub struct EscrowService;

impl EscrowService {
    /// Requested fee is clamped into the configured band rather than
    /// rejected; absent means the platform default.
    pub fn clamp_fee_bps(requested: Option<i32>, cfg: &EscrowInfo) -> i32 {
        requested
            .unwrap_or(cfg.default_fee_bps)
            .clamp(cfg.min_fee_bps, cfg.max_fee_bps)
    }

    pub fn compute_platform_fee(amount: i64, fee_bps: i32) -> i64 {
        amount * fee_bps as i64 / 10_000
    }

    pub async fn create(
        state: &AppState,
        req: CreateEscrowRequest,
    ) -> Result<EscrowDto, ApiError> {
        req.validate()?;
        if req.buyer_id == req.seller_id {
            return Err(ApiError::BadRequest("Buyer and seller must differ".into()));
        }

        let amount = naira_to_kobo(req.amount)?;
        let fee_bps = Self::clamp_fee_bps(req.fee_bps, &state.config.escrow);
        let platform_fee = Self::compute_platform_fee(amount, fee_bps);

        let mut conn = state.db.get()?;
        let escrow = conn.transaction::<EscrowTransaction, ApiError, _>(|conn| {
            let escrow = EscrowRepository::create(
                conn,
                NewEscrowTransaction {
                    buyer_id: req.buyer_id,
                    seller_id: req.seller_id,
                    product_ref: req.product_ref.clone(),
                    amount,
                    platform_fee,
                    fee_bps,
                    status: EscrowStatus::Held,
                },
            )?;

            WalletService::debit_in_tx(
                conn,
                req.buyer_id,
                amount,
                TransactionKind::EscrowHold,
                "Escrow hold for purchase",
                Some(escrow.id),
            )?;

            WalletRepository::get_or_create(conn, req.seller_id)?;
            WalletRepository::add_to_escrow(conn, req.seller_id, amount)?;

            Ok(escrow)
        })?;

        info!(escrow_id = %escrow.id, amount, fee_bps, "escrow created");
        Ok(escrow.into())
    }

    /// Confirmation flags are informational; funds move only on release.
    pub async fn confirm(
        state: &AppState,
        id: Uuid,
        party: ConfirmingParty,
    ) -> Result<EscrowDto, ApiError> {
        let mut conn = state.db.get()?;
        let escrow = conn.transaction::<EscrowTransaction, ApiError, _>(|conn| {
            match EscrowRepository::try_set_confirmation(conn, id, party)? {
                Some(escrow) => Ok(escrow),
                None => Err(Self::state_error(conn, id, "confirm")?),
            }
        })?;
        Ok(escrow.into())
    }

    pub async fn release(state: &AppState, id: Uuid) -> Result<EscrowDto, ApiError> {
        let mut conn = state.db.get()?;
        let escrow = conn.transaction::<EscrowTransaction, ApiError, _>(|conn| {
            Self::release_in_tx(conn, id, EscrowStatus::Held)
        })?;

        state.notifier.notify(NotificationEvent::EscrowReleased {
            user_id: escrow.seller_id,
            amount: escrow.amount,
            reference: escrow.id,
        });
        info!(escrow_id = %escrow.id, "escrow released");
        Ok(escrow.into())
    }

    pub async fn refund(state: &AppState, id: Uuid) -> Result<EscrowDto, ApiError> {
        let mut conn = state.db.get()?;
        let escrow = conn.transaction::<EscrowTransaction, ApiError, _>(|conn| {
            Self::refund_in_tx(conn, id, EscrowStatus::Held)
        })?;
        info!(escrow_id = %escrow.id, "escrow refunded");
        Ok(escrow.into())
    }

    pub async fn dispute(state: &AppState, id: Uuid) -> Result<EscrowDto, ApiError> {
        let mut conn = state.db.get()?;
        let escrow = conn.transaction::<EscrowTransaction, ApiError, _>(|conn| {
            let Some(escrow) = EscrowRepository::try_transition(
                conn,
                id,
                EscrowStatus::Held,
                EscrowStatus::Disputed,
            )?
            else {
                return Err(Self::state_error(conn, id, "dispute")?);
            };
            Ok(escrow)
        })?;
        info!(escrow_id = %escrow.id, "escrow disputed");
        Ok(escrow.into())
    }

    /// Arbitration outcome for a disputed escrow; reuses the same settle
    /// paths as direct release/refund.
    pub async fn resolve(
        state: &AppState,
        id: Uuid,
        outcome: DisputeResolution,
    ) -> Result<EscrowDto, ApiError> {
        let mut conn = state.db.get()?;
        let escrow = conn.transaction::<EscrowTransaction, ApiError, _>(|conn| match outcome {
            DisputeResolution::Release => Self::release_in_tx(conn, id, EscrowStatus::Disputed),
            DisputeResolution::Refund => Self::refund_in_tx(conn, id, EscrowStatus::Disputed),
        })?;
        info!(escrow_id = %escrow.id, ?outcome, "dispute resolved");
        Ok(escrow.into())
    }

    /// Flip to released, then pay the seller the gross amount and take the
    /// platform fee as a separate ledger line (gross + fee, not net).
    fn release_in_tx(
        conn: &mut PgConnection,
        id: Uuid,
        from: EscrowStatus,
    ) -> Result<EscrowTransaction, ApiError> {
        let Some(escrow) =
            EscrowRepository::try_transition(conn, id, from, EscrowStatus::Released)?
        else {
            return Err(Self::state_error(conn, id, "release")?);
        };

        let wallet = WalletRepository::try_release_escrow(conn, escrow.seller_id, escrow.amount)?
            .ok_or_else(|| {
                error!(escrow_id = %escrow.id, "escrow balance underflow on release");
                ApiError::Internal("Escrow balance mismatch".into())
            })?;

        TransactionRepository::record(
            conn,
            NewTransaction {
                wallet_id: wallet.id,
                user_id: escrow.seller_id,
                kind: TransactionKind::EscrowRelease,
                amount: escrow.amount,
                description: "Escrow release: sale proceeds",
                reference: Some(escrow.id),
                txn_state: TxnState::Completed,
            },
        )?;

        if escrow.platform_fee > 0 {
            WalletService::debit_in_tx(
                conn,
                escrow.seller_id,
                escrow.platform_fee,
                TransactionKind::PlatformFee,
                "Platform fee on sale",
                Some(escrow.id),
            )?;
        }

        Ok(escrow)
    }

    /// Flip to refunded, drain the seller's escrow sub-balance and return
    /// the full amount to the buyer. No fee on refunds.
    fn refund_in_tx(
        conn: &mut PgConnection,
        id: Uuid,
        from: EscrowStatus,
    ) -> Result<EscrowTransaction, ApiError> {
        let Some(escrow) =
            EscrowRepository::try_transition(conn, id, from, EscrowStatus::Refunded)?
        else {
            return Err(Self::state_error(conn, id, "refund")?);
        };

        WalletRepository::try_drain_escrow(conn, escrow.seller_id, escrow.amount)?.ok_or_else(
            || {
                error!(escrow_id = %escrow.id, "escrow balance underflow on refund");
                ApiError::Internal("Escrow balance mismatch".into())
            },
        )?;

        WalletService::credit_in_tx(
            conn,
            escrow.buyer_id,
            escrow.amount,
            TransactionKind::EscrowRefund,
            "Escrow refund",
            Some(escrow.id),
        )?;

        Ok(escrow)
    }

    /// Distinguishes "wrong state" from "no such escrow" for the error.
    fn state_error(
        conn: &mut PgConnection,
        id: Uuid,
        action: &'static str,
    ) -> Result<ApiError, ApiError> {
        Ok(match EscrowRepository::find(conn, id)? {
            Some(escrow) => ApiError::InvalidStateTransition {
                action,
                from: escrow.status,
            },
            None => ApiError::NotFound("Escrow transaction not found".into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> EscrowInfo {
        EscrowInfo {
            default_fee_bps: 500,
            min_fee_bps: 300,
            max_fee_bps: 600,
        }
    }

    #[test]
    fn fee_on_typical_sale() {
        // ₦3000 at 5% -> ₦150
        assert_eq!(EscrowService::compute_platform_fee(300_000, 500), 15_000);
    }

    #[test]
    fn fee_rounds_down_on_odd_amounts() {
        assert_eq!(EscrowService::compute_platform_fee(101, 300), 3);
        assert_eq!(EscrowService::compute_platform_fee(33, 300), 0);
    }

    #[test]
    fn fee_bps_clamped_to_band() {
        let cfg = cfg();
        assert_eq!(EscrowService::clamp_fee_bps(None, &cfg), 500);
        assert_eq!(EscrowService::clamp_fee_bps(Some(100), &cfg), 300);
        assert_eq!(EscrowService::clamp_fee_bps(Some(450), &cfg), 450);
        assert_eq!(EscrowService::clamp_fee_bps(Some(2_000), &cfg), 600);
    }

    #[test]
    fn terminal_states() {
        assert!(EscrowStatus::Released.is_terminal());
        assert!(EscrowStatus::Refunded.is_terminal());
        assert!(!EscrowStatus::Held.is_terminal());
        assert!(!EscrowStatus::Disputed.is_terminal());
    }
}
