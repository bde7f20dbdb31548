use crate::domain::model::{BaziChart, Element, Gender};

pub const SYSTEM_PROMPT: &str = "你是一位专业的八字命理分析师，擅长用现代、通俗易懂的语言解读传统命理。

你的解读风格：
1. 清晰简洁，避免过度专业的术语
2. 积极正面，给予建设性建议
3. 客观中立，不做绝对性预测
4. 内容仅供娱乐参考

重要约束：
- 禁止提供绝对性预测（如\"你必定会...\"）
- 禁止提供医疗建议
- 禁止提供投资建议
- 禁止提供法律建议
- 使用\"可能\"、\"倾向\"、\"建议\"等词汇";

/// 用戶提示詞：嵌入四柱、五行與日主，並要求按六個固定標題輸出
pub fn build_user_prompt(chart: &BaziChart, gender: Gender) -> String {
    let pillars = &chart.pillars;
    let elements = &chart.elements;

    format!(
        "请基于以下八字信息进行解读：

【基本信息】
性别：{gender}

【四柱八字】
年柱：{year}
月柱：{month}
日柱：{day}（日主）
时柱：{hour}

【五行分布】
木：{wood}  火：{fire}  土：{earth}  金：{metal}  水：{water}

【日主】
{day_master}

请按以下格式输出（每个部分150字左右，使用自然段落）：

## 总体概况
[概述这个八字的整体特点和气质]

## 性格特征
[分析性格倾向和行为特点]

## 感情运势
[解读感情方面的特点和建议]

## 事业运势
[分析适合的职业方向和发展建议]

## 财运趋势
[解读财运特点和理财建议]

## 健康提示
[提供健康方面的关注点，但不做医疗诊断]",
        gender = gender.chinese(),
        year = pillars.year,
        month = pillars.month,
        day = pillars.day,
        hour = pillars.hour,
        wood = elements.get(Element::Wood),
        fire = elements.get(Element::Fire),
        earth = elements.get(Element::Earth),
        metal = elements.get(Element::Metal),
        water = elements.get(Element::Water),
        day_master = chart.day_master,
    )
}
