//! 订单状态流转校验

use shared::error::{AppError, ErrorCode};
use shared::models::OrderStatus;

/// 校验状态流转是否合法
///
/// 合法流转见 [`OrderStatus::can_transition_to`]；同状态视为仅更新备注。
pub fn ensure_transition(from: OrderStatus, to: OrderStatus) -> Result<(), AppError> {
    if from.can_transition_to(to) {
        return Ok(());
    }
    let message = if from.is_terminal() {
        format!("Order is already {from} and cannot move to {to}")
    } else {
        format!("Cannot change order status from {from} to {to}")
    };
    Err(AppError::business_rule(ErrorCode::OrderInvalidStatusTransition, message)
    .with_detail("from", from.as_str())
    .with_detail("to", to.as_str()))
}
