//! End-to-end orchestrator flows against a scripted reporting service

pub mod dashboard_flow;
