// ==========================================
// Flow Code 分类集成测试
// ==========================================
// 测试目标: 验证路线提取与 Flow Code 判定的性质
// 覆盖范围: 标准场景 Code 0~4 / 值清洗 / 幂等 / 容错
// ==========================================


use hvdc_flow_code::domain::shipment::CellValue;
use hvdc_flow_code::domain::types::{FlowCode, LocationCategory};
use hvdc_flow_code::engine::{FlowPipeline, RouteExtractor};
use hvdc_flow_code::importer::ValueNormalizer;
use test_helpers::ShipmentBuilder;

// ==========================================
// 标准场景
// ==========================================

#[test]
fn test_pre_arrival_is_code_0() {
    let pipeline = FlowPipeline::default();
    let record = ShipmentBuilder::new("HE-0001")
        .location("PRE ARRIVAL")
        .status("PRE ARRIVAL")
        .build();

    let result = pipeline.classify_record(&record);
    assert_eq!(result.flow_code, FlowCode(0));
    assert_eq!(result.route.tokens(), &[LocationCategory::PreArrival]);
    assert_eq!(result.location_category, LocationCategory::PreArrival);
    assert!(result.confidence >= 0.95);
}

#[test]
fn test_site_only_is_code_1() {
    let pipeline = FlowPipeline::default();
    let record = ShipmentBuilder::new("HE-0002")
        .location("AGI")
        .status("SITE")
        .site("AGI", "2024-01-15")
        .build();

    let result = pipeline.classify_record(&record);
    assert_eq!(result.flow_code, FlowCode(1));
    assert_eq!(result.route.route_string(), "port → site");
    assert_eq!(result.location_category, LocationCategory::Site);
    assert_eq!(result.confidence, 1.0);
}

#[test]
fn test_one_warehouse_is_code_2() {
    let pipeline = FlowPipeline::default();
    let record = ShipmentBuilder::new("HE-0003")
        .location("DSV Indoor")
        .status("WAREHOUSE")
        .warehouse("DSV Indoor", "2024-01-05")
        .build();

    let result = pipeline.classify_record(&record);
    assert_eq!(result.flow_code, FlowCode(2));
    assert_eq!(result.route.route_string(), "port → warehouse → site");
    assert_eq!(result.location_category, LocationCategory::Warehouse);
}

#[test]
fn test_warehouse_and_mosb_is_code_3() {
    let pipeline = FlowPipeline::default();
    let record = ShipmentBuilder::new("HE-0004")
        .location("MOSB")
        .status("MOSB")
        .warehouse("DSV Indoor", "2024-01-05")
        .mosb("2024-01-20")
        .build();

    let result = pipeline.classify_record(&record);
    assert_eq!(result.flow_code, FlowCode(3));
    assert_eq!(
        result.route.route_string(),
        "port → warehouse → offshore → site"
    );
    assert_eq!(result.location_category, LocationCategory::Offshore);
}

#[test]
fn test_two_warehouses_and_mosb_is_code_4() {
    let pipeline = FlowPipeline::default();
    let record = ShipmentBuilder::new("HE-0005")
        .location("DAS")
        .status("SITE")
        .warehouse("DSV Indoor", "2024-01-05")
        .warehouse("DSV Outdoor", "2024-01-10")
        .mosb("2024-01-20")
        .site("DAS", "2024-02-02")
        .build();

    let result = pipeline.classify_record(&record);
    assert_eq!(result.flow_code, FlowCode(4));
    assert_eq!(result.route.warehouse_handling(), 2);
}

// ==========================================
// 全局性质
// ==========================================

fn sample_records() -> Vec<hvdc_flow_code::ShipmentRecord> {
    vec![
        ShipmentBuilder::new("P-1").location("PRE ARRIVAL").build(),
        ShipmentBuilder::new("P-2").location("AGI").site("AGI", "2024-01-02").build(),
        ShipmentBuilder::new("P-3").warehouse("DSV MZP", "2024-01-02").build(),
        ShipmentBuilder::new("P-4")
            .warehouse("DSV Indoor", "2024-01-02")
            .warehouse("DSV Outdoor", "2024-01-03")
            .warehouse("DSV MZP", "2024-01-04")
            .build(),
        ShipmentBuilder::new("P-5")
            .warehouse("DSV Indoor", "2024-01-02")
            .warehouse("DSV Outdoor", "2024-01-03")
            .warehouse("DSV MZP", "2024-01-04")
            .mosb("2024-01-10")
            .build(),
        ShipmentBuilder::new("P-6").mosb("MOSB").build(),
        ShipmentBuilder::new("P-7").build(),
        ShipmentBuilder::new("P-8").malformed_location().build(),
    ]
}

#[test]
fn test_every_code_is_canonical() {
    let pipeline = FlowPipeline::default();
    for record in sample_records() {
        let result = pipeline.classify_record(&record);
        assert!(
            result.flow_code.is_canonical(),
            "{} 的 Flow Code 超出 0~4: {}",
            record.case_id,
            result.flow_code
        );
        assert!((0.0..=1.0).contains(&result.confidence));
    }
}

#[test]
fn test_route_shape() {
    let extractor = RouteExtractor::default();
    for record in sample_records() {
        let route = extractor.extract(&record);
        let tokens = route.tokens();
        if tokens == [LocationCategory::PreArrival] {
            continue;
        }
        assert_eq!(tokens.first(), Some(&LocationCategory::Port));
        assert_eq!(tokens.last(), Some(&LocationCategory::Site));
    }
}

#[test]
fn test_classification_is_idempotent() {
    let pipeline = FlowPipeline::default();
    for record in sample_records() {
        let first = pipeline.classify_record(&record);
        let second = pipeline.classify_record(&record);
        assert_eq!(first, second);
    }
}

#[test]
fn test_fallback_codes() {
    let pipeline = FlowPipeline::default();
    let records = sample_records();

    // 三个仓库无 MOSB → 2; 三个仓库加 MOSB → 4; 仅 MOSB → 兜底 2
    assert_eq!(pipeline.classify_record(&records[3]).flow_code, FlowCode(2));
    assert_eq!(pipeline.classify_record(&records[4]).flow_code, FlowCode(4));
    assert_eq!(pipeline.classify_record(&records[5]).flow_code, FlowCode(2));
    // 无任何节点数据 → 默认直送
    assert_eq!(pipeline.classify_record(&records[6]).flow_code, FlowCode(1));
}

#[test]
fn test_malformed_record_gets_default_result() {
    let pipeline = FlowPipeline::default();
    let record = ShipmentBuilder::new("HE-BAD")
        .malformed_location()
        .warehouse("DSV Indoor", "2024-01-05")
        .mosb("2024-01-20")
        .build();

    let result = pipeline.classify_record(&record);
    assert_eq!(result.flow_code, FlowCode(1));
    assert_eq!(result.route.route_string(), "port → site");
    assert_eq!(result.confidence, 0.5);
}

// ==========================================
// 值清洗
// ==========================================

#[test]
fn test_clean_and_is_valid() {
    assert_eq!(ValueNormalizer::clean(&CellValue::Empty), "");
    assert_eq!(ValueNormalizer::clean(&CellValue::Number(f64::NAN)), "");
    assert_eq!(
        ValueNormalizer::clean(&CellValue::text("\u{3000}DSV\u{3000}\u{3000}Indoor  ")),
        "DSV Indoor"
    );

    assert!(!ValueNormalizer::is_valid(&CellValue::Empty));
    assert!(!ValueNormalizer::is_valid(&CellValue::text("nan")));
    assert!(!ValueNormalizer::is_valid(&CellValue::text("NaN")));
    assert!(!ValueNormalizer::is_valid(&CellValue::text("None")));
    assert!(!ValueNormalizer::is_valid(&CellValue::text("\u{3000}")));
    assert!(ValueNormalizer::is_valid(&CellValue::text("2024-01-05")));
    assert!(ValueNormalizer::is_valid(&CellValue::Number(45292.0)));
}

#[test]
fn test_full_width_location_is_recognized() {
    let pipeline = FlowPipeline::default();
    let record = ShipmentBuilder::new("HE-FW")
        .location("PRE\u{3000}ARRIVAL")
        .warehouse("DSV Indoor", "2024-01-05")
        .build();

    assert_eq!(pipeline.classify_record(&record).flow_code, FlowCode(0));
}

#[test]
fn test_punctuated_pre_arrival_is_code_0() {
    let pipeline = FlowPipeline::default();
    for location in ["Pre-Arrival", "PRE_ARRIVAL"] {
        let record = ShipmentBuilder::new("HE-PA")
            .location(location)
            .warehouse("DSV Indoor", "2024-01-05")
            .build();

        let result = pipeline.classify_record(&record);
        assert_eq!(result.flow_code, FlowCode(0), "{}", location);
        assert_eq!(result.route.tokens(), &[LocationCategory::PreArrival]);
    }
}
