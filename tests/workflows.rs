mod common;

use std::collections::BTreeMap;
use std::sync::Arc;

use agentic_flows::workflows::{Chain, FanOut, RefineLoop, Router, TaskOrchestrator};
use agentic_flows::FlowError;
use common::{EchoProvider, ScriptedProvider};

fn stages(prompts: &[&str]) -> Vec<String> {
    prompts.iter().map(|p| p.to_string()).collect()
}

#[tokio::test]
async fn chain_issues_one_call_per_stage_in_order() {
    let provider = Arc::new(ScriptedProvider::new(&["out1", "out2", "out3"]));
    let chain = Chain::new(provider.clone()).with_stages(stages(&["S1", "S2", "S3"]));

    let result = chain.chain("INPUT").await.unwrap();

    assert_eq!(result, "out3");
    assert_eq!(provider.call_count(), 3);
    let prompts = provider.prompts();
    assert!(prompts[0].contains("S1") && prompts[0].contains("INPUT"));
    assert!(prompts[1].contains("S2") && prompts[1].contains("out1"));
    assert!(prompts[2].contains("S3") && prompts[2].contains("out2"));
}

#[tokio::test]
async fn chain_failure_identifies_stage_index() {
    let provider = Arc::new(ScriptedProvider::with_script(vec![
        Ok("fine".to_string()),
        Err("model unavailable".to_string()),
    ]));
    let chain = Chain::new(provider.clone()).with_stages(stages(&["S1", "S2", "S3"]));

    let err = chain.chain("INPUT").await.unwrap_err();

    assert!(matches!(err, FlowError::ChainStage { index: 1, .. }));
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn chain_rejects_empty_stage_list() {
    let provider = Arc::new(ScriptedProvider::new(&[]));
    let chain = Chain::new(provider.clone()).with_stages(Vec::new());

    let err = chain.chain("INPUT").await.unwrap_err();

    assert!(matches!(err, FlowError::Validation(_)));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn chain_is_deterministic_over_identical_scripts() {
    let script = ["alpha", "beta"];
    let first = Chain::new(Arc::new(ScriptedProvider::new(&script)))
        .with_stages(stages(&["S1", "S2"]))
        .chain("INPUT")
        .await
        .unwrap();
    let second = Chain::new(Arc::new(ScriptedProvider::new(&script)))
        .with_stages(stages(&["S1", "S2"]))
        .chain("INPUT")
        .await
        .unwrap();

    assert_eq!(first, second);
}

fn support_routes() -> BTreeMap<String, String> {
    let mut routes = BTreeMap::new();
    routes.insert("billing".to_string(), "BILLING_PROMPT".to_string());
    routes.insert("technical".to_string(), "TECHNICAL_PROMPT".to_string());
    routes
}

#[tokio::test]
async fn router_makes_exactly_two_calls_and_uses_selected_prompt() {
    let provider = Arc::new(ScriptedProvider::new(&[
        r#"{"next":"billing","reason":"payment issue"}"#,
        "refund on the way",
    ]));
    let router = Router::new(provider.clone());

    let answer = router.route("I was double charged", &support_routes()).await.unwrap();

    assert_eq!(answer, "refund on the way");
    assert_eq!(provider.call_count(), 2);
    let prompts = provider.prompts();
    assert!(prompts[0].contains("billing") && prompts[0].contains("technical"));
    assert!(prompts[1].contains("BILLING_PROMPT"));
    assert!(prompts[1].contains("I was double charged"));
}

#[tokio::test]
async fn router_surfaces_unknown_route_without_second_call() {
    let provider = Arc::new(ScriptedProvider::new(&[
        r#"{"next":"unknown","reason":"guessing"}"#,
    ]));
    let router = Router::new(provider.clone());

    let err = router.route("strange ticket", &support_routes()).await.unwrap_err();

    match err {
        FlowError::UnknownRoute { route, known, input } => {
            assert_eq!(route, "unknown");
            assert_eq!(known, vec!["billing".to_string(), "technical".to_string()]);
            assert_eq!(input, "strange ticket");
        }
        other => panic!("expected UnknownRoute, got {other:?}"),
    }
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn router_rejects_empty_routes() {
    let provider = Arc::new(ScriptedProvider::new(&[]));
    let router = Router::new(provider.clone());

    let err = router.route("ticket", &BTreeMap::new()).await.unwrap_err();

    assert!(matches!(err, FlowError::Validation(_)));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn fan_out_preserves_input_order_despite_completion_order() {
    // c finishes first, a last; results must still follow input order.
    let provider = Arc::new(
        EchoProvider::new().with_delays(&[("a", 60), ("b", 40), ("c", 10)]),
    );
    let fan_out = FanOut::new(provider.clone());
    let inputs = vec!["a".to_string(), "b".to_string(), "c".to_string()];

    let results = fan_out.fan_out("PROMPT", &inputs, 3).await.unwrap();

    assert_eq!(results, vec!["f(a)", "f(b)", "f(c)"]);
    assert_eq!(provider.call_count(), 3);
}

#[tokio::test]
async fn fan_out_with_single_worker_stays_ordered() {
    let provider = Arc::new(EchoProvider::new());
    let fan_out = FanOut::new(provider.clone());
    let inputs = vec!["a".to_string(), "b".to_string(), "c".to_string()];

    let results = fan_out.fan_out("PROMPT", &inputs, 1).await.unwrap();

    assert_eq!(results, vec!["f(a)", "f(b)", "f(c)"]);
}

#[tokio::test]
async fn fan_out_rejects_zero_workers_before_any_call() {
    let provider = Arc::new(EchoProvider::new());
    let fan_out = FanOut::new(provider.clone());
    let inputs = vec!["a".to_string()];

    let err = fan_out.fan_out("PROMPT", &inputs, 0).await.unwrap_err();

    assert!(matches!(err, FlowError::Validation(_)));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn fan_out_rejects_empty_inputs() {
    let provider = Arc::new(EchoProvider::new());
    let fan_out = FanOut::new(provider.clone());

    let err = fan_out.fan_out("PROMPT", &[], 2).await.unwrap_err();

    assert!(matches!(err, FlowError::Validation(_)));
}

#[tokio::test]
async fn fan_out_reports_failing_index_after_siblings_finish() {
    let provider = Arc::new(EchoProvider::new().fail_on("b"));
    let fan_out = FanOut::new(provider.clone());
    let inputs = vec!["a".to_string(), "b".to_string(), "c".to_string()];

    let err = fan_out.fan_out("PROMPT", &inputs, 3).await.unwrap_err();

    assert!(matches!(err, FlowError::FanOutWorker { index: 1, .. }));
    // Siblings were dispatched and allowed to finish.
    assert_eq!(provider.call_count(), 3);
}

#[tokio::test]
async fn refine_accepts_first_pass_with_single_entry_history() {
    let provider = Arc::new(ScriptedProvider::new(&[
        r#"{"thoughts":"t1","response":"RESP_ONE"}"#,
        r#"{"verdict":"PASS","feedback":"great"}"#,
    ]));
    let refine = RefineLoop::new(provider.clone());

    let result = refine.refine("write a counter").await.unwrap();

    assert_eq!(result.solution, "RESP_ONE");
    assert_eq!(result.history.len(), 1);
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn refine_feeds_all_responses_and_feedback_into_later_context() {
    let provider = Arc::new(ScriptedProvider::new(&[
        r#"{"thoughts":"t1","response":"RESP_ONE"}"#,
        r#"{"verdict":"NEEDS_IMPROVEMENT","feedback":"FB_ONE"}"#,
        r#"{"thoughts":"t2","response":"RESP_TWO"}"#,
        r#"{"verdict":"NEEDS_IMPROVEMENT","feedback":"FB_TWO"}"#,
        r#"{"thoughts":"t3","response":"RESP_THREE"}"#,
        r#"{"verdict":"PASS","feedback":"done"}"#,
    ]));
    let refine = RefineLoop::new(provider.clone());

    let result = refine.refine("write a counter").await.unwrap();

    assert_eq!(result.solution, "RESP_THREE");
    assert_eq!(result.history.len(), 3);

    // Third generator call carries both prior responses and both feedbacks.
    let third_generation_prompt = &provider.prompts()[4];
    assert!(third_generation_prompt.contains("RESP_ONE"));
    assert!(third_generation_prompt.contains("RESP_TWO"));
    assert!(third_generation_prompt.contains("FB_ONE"));
    assert!(third_generation_prompt.contains("FB_TWO"));
}

#[tokio::test]
async fn refine_stops_at_attempt_ceiling() {
    let provider = Arc::new(ScriptedProvider::new(&[
        r#"{"thoughts":"t1","response":"RESP_ONE"}"#,
        r#"{"verdict":"NEEDS_IMPROVEMENT","feedback":"FB_ONE"}"#,
        r#"{"thoughts":"t2","response":"RESP_TWO"}"#,
        r#"{"verdict":"NEEDS_IMPROVEMENT","feedback":"FB_TWO"}"#,
    ]));
    let refine = RefineLoop::new(provider.clone()).with_max_attempts(2);

    let err = refine.refine("write a counter").await.unwrap_err();

    match err {
        FlowError::RetriesExhausted { attempts, history } => {
            assert_eq!(attempts, 2);
            assert_eq!(history.len(), 2);
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    assert_eq!(provider.call_count(), 4);
}

#[tokio::test]
async fn refine_abort_attaches_partial_history() {
    let provider = Arc::new(ScriptedProvider::with_script(vec![
        Ok(r#"{"thoughts":"t1","response":"RESP_ONE"}"#.to_string()),
        Err("evaluator offline".to_string()),
    ]));
    let refine = RefineLoop::new(provider);

    let err = refine.refine("write a counter").await.unwrap_err();

    match err {
        FlowError::RefineAborted { history, source } => {
            assert_eq!(history.len(), 1);
            assert!(matches!(*source, FlowError::Completion(_)));
        }
        other => panic!("expected RefineAborted, got {other:?}"),
    }
}

#[tokio::test]
async fn task_orchestrator_runs_one_worker_per_subtask_in_order() {
    let provider = Arc::new(ScriptedProvider::new(&[
        r#"{"analysis":"two angles","tasks":[{"kind":"formal","description":"D1"},{"type":"casual","description":"D2"}]}"#,
        "FORMAL_TEXT",
        "CASUAL_TEXT",
    ]));
    let orchestrator = TaskOrchestrator::new(provider.clone());

    let output = orchestrator.process("write about Rust").await.unwrap();

    assert_eq!(output.analysis, "two angles");
    assert_eq!(output.worker_responses, vec!["FORMAL_TEXT", "CASUAL_TEXT"]);
    assert_eq!(provider.call_count(), 3);
    let prompts = provider.prompts();
    assert!(prompts[1].contains("formal") && prompts[1].contains("D1"));
    assert!(prompts[2].contains("casual") && prompts[2].contains("D2"));
}

#[tokio::test]
async fn task_orchestrator_rejects_empty_description() {
    let provider = Arc::new(ScriptedProvider::new(&[]));
    let orchestrator = TaskOrchestrator::new(provider.clone());

    let err = orchestrator.process("  ").await.unwrap_err();

    assert!(matches!(err, FlowError::Validation(_)));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn task_orchestrator_treats_empty_plan_as_completion_failure() {
    let provider = Arc::new(ScriptedProvider::new(&[
        r#"{"analysis":"nothing to do","tasks":[]}"#,
    ]));
    let orchestrator = TaskOrchestrator::new(provider.clone());

    let err = orchestrator.process("write about Rust").await.unwrap_err();

    assert!(matches!(err, FlowError::Completion(_)));
    assert_eq!(provider.call_count(), 1);
}
