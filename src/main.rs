// ==========================================
// HVDC 物流 Flow Code 引擎 - 命令行入口
// ==========================================
// 用法:
//   flow-report <data.xlsx|data.csv> [config.json] [reference.json]
//
// 报告 (JSON) 输出到 stdout, 日志输出到 stderr
// FLOW_LOG_FORMAT=json 时输出 JSON 日志
// ==========================================

use anyhow::{bail, Context, Result};
use hvdc_flow_code::config::EngineConfig;
use hvdc_flow_code::engine::FlowPipeline;
use hvdc_flow_code::importer::{load_reference_distribution, RecordMapper, UniversalFileParser};
use hvdc_flow_code::logging;

fn main() -> Result<()> {
    match std::env::var("FLOW_LOG_FORMAT").as_deref() {
        Ok("json") => logging::init_json(),
        _ => logging::init(),
    }

    let mut args = std::env::args().skip(1);
    let Some(data_path) = args.next() else {
        bail!("用法: flow-report <data.xlsx|data.csv> [config.json] [reference.json]");
    };
    let config_path = args.next().filter(|s| !s.trim().is_empty());
    let reference_path = args.next().filter(|s| !s.trim().is_empty());

    tracing::info!(
        version = hvdc_flow_code::VERSION,
        data = %data_path,
        "{} 启动",
        hvdc_flow_code::APP_NAME
    );

    let config = match &config_path {
        Some(path) => {
            EngineConfig::load(path).with_context(|| format!("加载配置失败: {path}"))?
        }
        None => EngineConfig::default(),
    };

    let rows = UniversalFileParser
        .parse(&data_path)
        .with_context(|| format!("读取数据文件失败: {data_path}"))?;
    let batch = RecordMapper::new(&config.schema)
        .map_rows(rows)
        .context("记录映射失败")?;

    let reference = reference_path
        .as_deref()
        .map(|path| {
            load_reference_distribution(path)
                .with_context(|| format!("读取参考分布失败: {path}"))
        })
        .transpose()?;

    let report = FlowPipeline::new(&config).run(&batch.records, reference.as_ref());
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("报告序列化失败")?
    );

    if let Some(gap) = &report.gap_report {
        for message in gap.issue_messages() {
            tracing::warn!("{}", message);
        }
    }
    Ok(())
}
