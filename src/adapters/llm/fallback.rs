use crate::domain::model::Interpretation;

const OVERVIEW: &str = "您的八字显示出独特的能量组合，五行之间相互作用形成了您特有的命理格局。整体而言，您是一个内心丰富、思维活跃的人，具有较强的适应能力和学习能力。命局中蕴含着丰富的可能性，建议您在人生道路上保持开放的心态，善于把握机遇。";

const PERSONALITY: &str = "您的性格中兼具理性与感性的特质。在处理事务时，您倾向于深思熟虑，不轻易做出决定。同时，您对美好事物有着敏锐的感知力，富有创造力和想象力。在人际交往中，您可能显得有些内敛，但一旦建立信任，便会展现出真诚和温暖的一面。建议您在保持独立思考的同时，也要适当表达自己的想法和情感。";

const LOVE: &str = "在感情方面，您是一个重视精神契合的人，相比外在条件，更看重双方的价值观和生活理念是否一致。您倾向于稳定、深刻的情感关系，对感情专一且负责。建议在感情中保持真诚沟通，不要因为顾虑太多而错失良缘。对于已有伴侣的人，建议多花时间了解对方的内心世界，共同成长。";

const CAREER: &str = "在事业发展上，您适合需要思考、分析和创造力的工作领域。可以考虑文化、教育、咨询、设计或技术类的职业方向。您具备持续学习和自我提升的能力，这将成为您职业发展的重要优势。建议您选择能够发挥自身特长的领域，不要过分追求外界的认可，而是专注于自己的成长和价值创造。";

const WEALTH: &str = "财运方面，您更适合通过稳定的工作和技能积累来获得收益，而不是投机性的财富增长。建议您建立长期的理财规划，注重积累而非快速致富。在消费观念上，您可能比较理性，懂得节制，这是很好的品质。同时也建议适度投资自己，提升专业能力将带来更好的回报。";

const HEALTH: &str = "健康方面，建议您注意劳逸结合，避免长期的精神压力。定期进行户外活动和运动，有助于保持身心平衡。在饮食上，建议规律作息，避免过度劳累。同时，保持良好的心态对健康至关重要，遇到问题时不要过度焦虑，学会适当放松和调节。如有健康问题，请及时咨询专业医生。";

/// 模型不可用時的固定解讀，六段皆非空
pub fn fallback_interpretation() -> Interpretation {
    Interpretation {
        overview: OVERVIEW.to_string(),
        personality: PERSONALITY.to_string(),
        love: LOVE.to_string(),
        career: CAREER.to_string(),
        wealth: WEALTH.to_string(),
        health: HEALTH.to_string(),
    }
}
