use deskpilot_protocol::ActionResult;
use deskpilot_protocol::ContextInfo;
use deskpilot_protocol::ErrorCode;
use deskpilot_protocol::FromParams;
use deskpilot_protocol::Request;
use deskpilot_protocol::Response;
use deskpilot_protocol::RpcResult;

use crate::error::ActionError;

/// Reads the method's parameter struct, or the `invalidParams` response to
/// send back instead.
#[allow(clippy::result_large_err)]
pub(super) fn parse_params<P: FromParams>(request: &Request) -> Result<P, Response> {
    P::from_params(request.params())
        .map_err(|e| Response::error(request.id, ErrorCode::InvalidParams, e.to_string()))
}

/// Wraps an executor outcome; failures are reported under `failure_code`.
pub(super) fn action_response(
    id: i64,
    verb: &str,
    outcome: Result<String, ActionError>,
    failure_code: ErrorCode,
    context: Option<ContextInfo>,
) -> Response {
    match outcome {
        Ok(description) => Response::success(
            id,
            RpcResult::ActionResult(ActionResult::ok(description, context)),
        ),
        Err(e) => Response::error(id, failure_code, format!("{} failed: {}", verb, e)),
    }
}
